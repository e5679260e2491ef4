//! Layout rendering (top bar, status bar)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{ContentState, UiState};

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, content_state: &ContentState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Current path
            Constraint::Length(34), // Viewer settings
        ])
        .split(area);

    let location = Paragraph::new(content_state.current_path())
        .style(Style::default().fg(Color::Green))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Location ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(location, chunks[0]);

    let settings = format!(
        "{} · mature {}",
        ui_state.display_mode.label(),
        if ui_state.obscure_nsfw { "hidden" } else { "shown" }
    );
    let viewer = Paragraph::new(settings)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Viewer "));
    frame.render_widget(viewer, chunks[1]);
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, content_state: &ContentState) {
    let (resolved, in_flight) = content_state.store_stats;
    let mut spans = vec![
        Span::styled(format!(" {} resolved", resolved), Style::default().fg(Color::Green)),
        Span::raw("  "),
        Span::styled(format!("{} resolving", in_flight), Style::default().fg(Color::Yellow)),
    ];
    if let Some(status) = &ui_state.status_message {
        spans.push(Span::raw("  │  "));
        spans.push(Span::raw(status.clone()));
    }

    let status = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" h: help ")
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(status, area);
}
