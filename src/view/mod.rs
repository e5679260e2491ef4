//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Main layout structure (top bar, status bar)
//! - `content`: Feed and entry page rendering
//! - `publish`: Publish card
//! - `overlays`: Modal overlays (error, copy-link menu, help)

mod utils;
mod layout;
mod content;
mod publish;
mod overlays;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{ContentState, PublishDraft, UiState};

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        ui_state: &UiState,
        content_state: &ContentState,
        draft: &PublishDraft,
        subscriptions: &HashSet<String>,
        now: DateTime<Utc>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Location + viewer settings
                Constraint::Min(0),    // Feed + publish card
                Constraint::Length(3), // Status bar
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], ui_state, content_state);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(65), // Feed or page
                Constraint::Percentage(35), // Publish card
            ])
            .split(chunks[1]);

        content::render_main_content(frame, main_chunks[0], ui_state, content_state, subscriptions, now);
        publish::render_publish_card(frame, main_chunks[1], ui_state, draft);

        layout::render_status_bar(frame, chunks[2], ui_state, content_state);

        // Copy-link menu overlay, anchored to its entry
        if let Some(menu) = &ui_state.copy_menu {
            overlays::render_copy_menu(frame, main_chunks[0], menu, content_state);
        }

        // Error notification overlay (if there's an error)
        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
