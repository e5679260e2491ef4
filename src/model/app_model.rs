//! Main application model with state management

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio::sync::RwLock;

use super::content::{ContentState, ContentView, PageDetail};
use super::entry::{CopyMenu, EntryRender};
use super::publish::PublishDraft;
use super::types::{ActiveSection, DisplayMode, PublishField, UiState};
use super::uri;

/// Main application model containing all state
pub struct AppModel {
    pub ui_state: Arc<Mutex<UiState>>,
    pub content_state: Arc<Mutex<ContentState>>,
    publish: Arc<Mutex<PublishDraft>>,
    subscriptions: Arc<RwLock<HashSet<String>>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(ui_state: UiState, balance: f64) -> Self {
        Self {
            ui_state: Arc::new(Mutex::new(ui_state)),
            content_state: Arc::new(Mutex::new(ContentState::default())),
            publish: Arc::new(Mutex::new(PublishDraft::new(balance))),
            subscriptions: Arc::new(RwLock::new(HashSet::new())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // UI State
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn cycle_section(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        self.ui_state.lock().await.active_section = section;
    }

    pub async fn cycle_display_mode(&self) -> DisplayMode {
        let mut state = self.ui_state.lock().await;
        state.display_mode = state.display_mode.next();
        state.display_mode
    }

    pub async fn toggle_obscure_nsfw(&self) -> bool {
        let mut state = self.ui_state.lock().await;
        state.obscure_nsfw = !state.obscure_nsfw;
        state.obscure_nsfw
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed().as_secs() > 5 {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn set_status(&self, message: impl Into<String>) {
        self.ui_state.lock().await.status_message = Some(message.into());
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    pub async fn open_copy_menu(&self, menu: CopyMenu) {
        self.ui_state.lock().await.copy_menu = Some(menu);
    }

    pub async fn close_copy_menu(&self) {
        self.ui_state.lock().await.copy_menu = None;
    }

    pub async fn get_copy_menu(&self) -> Option<CopyMenu> {
        self.ui_state.lock().await.copy_menu.clone()
    }

    // ========================================================================
    // Feed & Navigation
    // ========================================================================

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn set_entries(
        &self,
        entries: Vec<EntryRender>,
        store_stats: (usize, usize),
        feed_page: (usize, usize),
    ) {
        let mut state = self.content_state.lock().await;
        state.replace_entries(entries);
        state.store_stats = store_stats;
        state.feed_page = feed_page;
    }

    pub async fn content_move_up(&self) {
        self.content_state.lock().await.move_up();
    }

    pub async fn content_move_down(&self) {
        self.content_state.lock().await.move_down();
    }

    /// Selected visible entry and its row
    pub async fn get_selected_entry(&self) -> Option<(usize, EntryRender)> {
        let state = self.content_state.lock().await;
        state
            .selected_entry()
            .map(|entry| (state.selected_index, entry.clone()))
    }

    pub async fn is_page_open(&self) -> bool {
        matches!(self.content_state.lock().await.view, ContentView::Page(_))
    }

    pub async fn push_page(&self, path: String, entry: EntryRender) {
        let mut state = self.content_state.lock().await;
        let previous_view = std::mem::take(&mut state.view);
        state.navigation_stack.push(previous_view);
        state.view = ContentView::Page(PageDetail { path, entry });
    }

    /// Returns false when already at the feed
    pub async fn navigate_back(&self) -> bool {
        let mut state = self.content_state.lock().await;
        match state.navigation_stack.pop() {
            Some(previous) => {
                state.view = previous;
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Toggle a channel subscription; returns whether it is now subscribed
    pub async fn toggle_subscription(&self, channel_uri: &str) -> bool {
        let key = uri::normalize(channel_uri);
        let mut subscriptions = self.subscriptions.write().await;
        if subscriptions.remove(&key) {
            tracing::debug!(uri = %key, "Unsubscribed from channel");
            false
        } else {
            tracing::debug!(uri = %key, "Subscribed to channel");
            subscriptions.insert(key);
            true
        }
    }

    pub async fn get_subscriptions(&self) -> HashSet<String> {
        self.subscriptions.read().await.clone()
    }

    // ========================================================================
    // Publish
    // ========================================================================

    pub async fn get_publish_draft(&self) -> PublishDraft {
        self.publish.lock().await.clone()
    }

    pub async fn toggle_publish_field(&self) {
        let mut state = self.ui_state.lock().await;
        state.publish_field = state.publish_field.toggle();
    }

    pub async fn append_to_publish(&self, c: char) {
        let field = self.ui_state.lock().await.publish_field;
        let mut draft = self.publish.lock().await;
        match field {
            PublishField::FilePath => draft.path_input.push(c),
            PublishField::Name => draft.name.get_or_insert_with(String::new).push(c),
        }
    }

    pub async fn backspace_publish(&self) {
        let field = self.ui_state.lock().await.publish_field;
        let mut draft = self.publish.lock().await;
        match field {
            PublishField::FilePath => {
                draft.path_input.pop();
            }
            PublishField::Name => {
                if let Some(name) = draft.name.as_mut() {
                    name.pop();
                    if name.is_empty() {
                        draft.name = None;
                    }
                }
            }
        }
    }

    /// Commit the typed path as the chosen file. Returns the file name, or
    /// `None` when no path was typed.
    pub async fn choose_publish_file(&self) -> Option<String> {
        let mut draft = self.publish.lock().await;
        let path = draft.path_input.trim().to_string();
        if path.is_empty() {
            return None;
        }
        Some(draft.choose_file(&path))
    }

    pub async fn edit_existing_claim(&self, name: &str) {
        self.publish.lock().await.edit_existing(name);
        let mut state = self.ui_state.lock().await;
        state.active_section = ActiveSection::Publish;
        state.publish_field = PublishField::FilePath;
    }

    pub async fn clear_publish(&self) {
        self.publish.lock().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entry::RenderState;

    fn model() -> AppModel {
        AppModel::new(UiState::default(), 5.0)
    }

    fn entry(uri: &str) -> EntryRender {
        EntryRender {
            identifier: uri.to_string(),
            state: RenderState::Placeholder { uri: uri.to_string() },
            clickable: false,
            pending: false,
            owned_by_viewer: false,
            display_mode: DisplayMode::Normal,
        }
    }

    #[tokio::test]
    async fn pages_stack_and_pop_back_to_feed() {
        let model = model();
        assert_eq!(model.get_content_state().await.current_path(), "/");

        model.push_page("/doc:1".to_string(), entry("doc#1")).await;
        model.push_page("/@chan:2".to_string(), entry("@chan#2")).await;
        assert_eq!(model.get_content_state().await.current_path(), "/@chan:2");

        assert!(model.navigate_back().await);
        assert_eq!(model.get_content_state().await.current_path(), "/doc:1");
        assert!(model.navigate_back().await);
        assert!(!model.is_page_open().await);
        assert!(!model.navigate_back().await);
    }

    #[tokio::test]
    async fn subscriptions_key_on_normalized_uri() {
        let model = model();
        assert!(model.toggle_subscription("@chan#1").await);
        assert!(model.get_subscriptions().await.contains("lbry://@chan#1"));
        assert!(!model.toggle_subscription("lbry://@chan#1").await);
        assert!(model.get_subscriptions().await.is_empty());
    }

    #[tokio::test]
    async fn typed_path_is_committed_with_derived_name() {
        let model = model();
        assert_eq!(model.choose_publish_file().await, None);

        for c in "/tmp/My Clip!.mp4".chars() {
            model.append_to_publish(c).await;
        }
        assert_eq!(model.choose_publish_file().await.as_deref(), Some("My Clip!.mp4"));
        assert_eq!(model.get_publish_draft().await.name.as_deref(), Some("My-Clip.mp4"));
    }

    #[tokio::test]
    async fn typed_name_blocks_derivation() {
        let model = model();
        model.toggle_publish_field().await;
        for c in "mine".chars() {
            model.append_to_publish(c).await;
        }
        model.toggle_publish_field().await;
        for c in "/tmp/a b.mp4".chars() {
            model.append_to_publish(c).await;
        }
        model.choose_publish_file().await;

        assert_eq!(model.get_publish_draft().await.name.as_deref(), Some("mine"));
    }

    #[tokio::test]
    async fn old_errors_stay_until_expired() {
        let model = model();
        model.set_error("boom".to_string()).await;
        model.auto_clear_old_errors().await;
        assert!(model.has_error().await);
        model.clear_error().await;
        assert!(!model.has_error().await);
    }
}
