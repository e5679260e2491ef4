//! Content view state: the feed list and pages opened from it

use super::entry::EntryRender;

/// A page reached by activating a feed entry
#[derive(Clone, Debug)]
pub struct PageDetail {
    pub path: String,
    pub entry: EntryRender,
}

/// Represents the current view in the main content area
#[derive(Clone, Debug, Default)]
pub enum ContentView {
    #[default]
    Feed,
    Page(PageDetail),
}

/// State for the main content area
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub view: ContentView,
    pub navigation_stack: Vec<ContentView>,
    /// Visible entries of the current render; hidden ones are left out
    pub entries: Vec<EntryRender>,
    pub selected_index: usize,
    /// (resolved, in flight) as reported by the store
    pub store_stats: (usize, usize),
    /// (current, total) feed page, 1-based
    pub feed_page: (usize, usize),
}

impl ContentState {
    pub fn selected_entry(&self) -> Option<&EntryRender> {
        self.entries.get(self.selected_index)
    }

    /// Replace the rendered entries, keeping the selection on the same URI
    /// where possible
    pub fn replace_entries(&mut self, entries: Vec<EntryRender>) {
        let selected_uri = self.selected_entry().map(|e| e.identifier.clone());
        self.entries = entries;
        self.selected_index = selected_uri
            .and_then(|uri| self.entries.iter().position(|e| e.identifier == uri))
            .unwrap_or(self.selected_index)
            .min(self.entries.len().saturating_sub(1));
    }

    /// Location shown in the top bar
    pub fn current_path(&self) -> String {
        match &self.view {
            ContentView::Feed => "/".to_string(),
            ContentView::Page(page) => page.path.clone(),
        }
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_index < self.entries.len().saturating_sub(1) {
            self.selected_index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entry::RenderState;
    use crate::model::types::DisplayMode;

    fn placeholder(uri: &str) -> EntryRender {
        EntryRender {
            identifier: uri.to_string(),
            state: RenderState::Placeholder { uri: uri.to_string() },
            clickable: false,
            pending: false,
            owned_by_viewer: false,
            display_mode: DisplayMode::Normal,
        }
    }

    #[test]
    fn selection_follows_uri_when_entries_disappear() {
        let mut state = ContentState::default();
        state.replace_entries(vec![placeholder("a"), placeholder("b"), placeholder("c")]);
        state.move_down();
        state.move_down();
        assert_eq!(state.selected_entry().unwrap().identifier, "c");

        state.replace_entries(vec![placeholder("b"), placeholder("c")]);
        assert_eq!(state.selected_entry().unwrap().identifier, "c");

        state.replace_entries(vec![placeholder("a")]);
        assert_eq!(state.selected_index, 0);

        state.replace_entries(vec![]);
        assert!(state.selected_entry().is_none());
    }

    #[test]
    fn movement_is_clamped() {
        let mut state = ContentState::default();
        state.replace_entries(vec![placeholder("a"), placeholder("b")]);
        state.move_up();
        assert_eq!(state.selected_index, 0);
        state.move_down();
        state.move_down();
        assert_eq!(state.selected_index, 1);
    }
}
