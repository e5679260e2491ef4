//! Publish draft: file selection and default claim name derivation

use std::path::Path;

/// Characters allowed in a derived claim name besides alphanumerics.
/// Spaces survive stripping so the first one can become a hyphen.
fn is_name_safe(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ')
}

/// Default a claim name from a chosen file's name.
///
/// Returns `None` when a name is already set or nothing usable remains.
pub fn derive_draft_name(file_name: &str, existing_name: Option<&str>) -> Option<String> {
    if existing_name.is_some_and(|name| !name.is_empty()) {
        return None;
    }

    let stripped: String = file_name.chars().filter(|c| is_name_safe(*c)).collect();
    let derived = stripped.replacen(' ', "-", 1);
    (!derived.is_empty()).then_some(derived)
}

/// The file-selection step of the publish form
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PublishDraft {
    pub file_path: Option<String>,
    pub name: Option<String>,
    /// Editing an existing claim rather than creating one
    pub is_still_editing: bool,
    pub balance: f64,
    /// Text typed into the path field, committed on choose
    pub path_input: String,
}

impl PublishDraft {
    pub fn new(balance: f64) -> Self {
        Self {
            balance,
            ..Default::default()
        }
    }

    /// Record a chosen file. Returns the selected file name.
    pub fn choose_file(&mut self, path: &str) -> String {
        let file_name = Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.file_path = Some(path.to_string());
        if let Some(name) = derive_draft_name(&file_name, self.name.as_deref()) {
            tracing::debug!(path, name = %name, "Derived draft name from file");
            self.name = Some(name);
        }
        file_name
    }

    /// Start editing an existing claim
    pub fn edit_existing(&mut self, name: &str) {
        self.name = Some(name.to_string());
        self.file_path = None;
        self.path_input.clear();
        self.is_still_editing = true;
    }

    /// Drop everything but the balance
    pub fn clear(&mut self) {
        *self = Self::new(self.balance);
    }

    pub fn is_disabled(&self) -> bool {
        self.balance <= 0.0
    }

    /// Subtitle shown for as long as an existing claim is being edited
    pub fn editing_subtitle(&self) -> Option<&'static str> {
        self.is_still_editing
            .then_some("You are currently editing a claim. Ctrl+X to clear")
    }

    /// Notice shown while editing a named claim
    pub fn editing_notice(&self) -> Option<String> {
        match &self.name {
            Some(name) if self.is_still_editing && !name.is_empty() => Some(format!(
                "If you don't choose a file, the file from your existing claim \"{}\" will be used.",
                name
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_unsafe_chars_and_hyphenates_first_space() {
        assert_eq!(derive_draft_name("My File!.mp4", None), Some("My-File.mp4".to_string()));
        assert_eq!(derive_draft_name("a b c.txt", None), Some("a-b c.txt".to_string()));
        assert_eq!(derive_draft_name("clip#1@home?.mov", None), Some("clip1home.mov".to_string()));
    }

    #[test]
    fn existing_name_is_never_overwritten() {
        assert_eq!(derive_draft_name("My File!.mp4", Some("already-set")), None);
        assert_eq!(derive_draft_name("My File!.mp4", Some("")), Some("My-File.mp4".to_string()));
    }

    #[test]
    fn nothing_usable_derives_nothing() {
        assert_eq!(derive_draft_name("!!!", None), None);
    }

    #[test]
    fn choose_file_sets_path_and_derives_name_once() {
        let mut draft = PublishDraft::new(10.0);

        let file_name = draft.choose_file("/home/me/videos/My File!.mp4");
        assert_eq!(file_name, "My File!.mp4");
        assert_eq!(draft.file_path.as_deref(), Some("/home/me/videos/My File!.mp4"));
        assert_eq!(draft.name.as_deref(), Some("My-File.mp4"));

        draft.choose_file("/tmp/other.mp4");
        assert_eq!(draft.file_path.as_deref(), Some("/tmp/other.mp4"));
        assert_eq!(draft.name.as_deref(), Some("My-File.mp4"));
    }

    #[test]
    fn editing_notice_stays_while_editing_a_named_claim() {
        let mut draft = PublishDraft::new(1.0);
        assert_eq!(draft.editing_notice(), None);
        assert_eq!(draft.editing_subtitle(), None);

        draft.edit_existing("my-video");
        assert!(draft.editing_notice().unwrap().contains("\"my-video\""));
        assert!(draft.editing_subtitle().is_some());

        draft.choose_file("/tmp/new.mp4");
        assert!(draft.editing_notice().unwrap().contains("\"my-video\""));
        assert_eq!(draft.name.as_deref(), Some("my-video"));

        draft.name = Some(String::new());
        assert_eq!(draft.editing_notice(), None);
        assert!(draft.editing_subtitle().is_some());

        draft.clear();
        assert_eq!(draft.editing_subtitle(), None);
    }

    #[test]
    fn clear_keeps_balance_only() {
        let mut draft = PublishDraft::new(0.0);
        draft.choose_file("/tmp/a.mp4");
        draft.clear();

        assert_eq!(draft, PublishDraft::new(0.0));
        assert!(draft.is_disabled());
    }
}
