//! Core type definitions for the application

use std::time::Instant;

use super::entry::CopyMenu;

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Feed,
    Publish,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Feed => ActiveSection::Publish,
            ActiveSection::Publish => ActiveSection::Feed,
        }
    }
}

/// How much of each feed entry is drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DisplayMode {
    #[default]
    Normal,
    Large,
    Compact,
}

impl DisplayMode {
    pub fn next(self) -> Self {
        match self {
            DisplayMode::Normal => DisplayMode::Large,
            DisplayMode::Large => DisplayMode::Compact,
            DisplayMode::Compact => DisplayMode::Normal,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Normal => "normal",
            DisplayMode::Large => "large",
            DisplayMode::Compact => "compact",
        }
    }
}

/// Which field of the publish card receives typed input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PublishField {
    #[default]
    FilePath,
    Name,
}

impl PublishField {
    pub fn toggle(self) -> Self {
        match self {
            PublishField::FilePath => PublishField::Name,
            PublishField::Name => PublishField::FilePath,
        }
    }
}

/// UI state for the application
#[derive(Clone, Debug)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub display_mode: DisplayMode,
    pub obscure_nsfw: bool,
    pub show_placeholders: bool,
    pub publish_field: PublishField,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub status_message: Option<String>,
    pub copy_menu: Option<CopyMenu>,
    pub show_help_popup: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Feed,
            display_mode: DisplayMode::default(),
            obscure_nsfw: true,
            show_placeholders: true,
            publish_field: PublishField::default(),
            error_message: None,
            error_timestamp: None,
            status_message: None,
            copy_menu: None,
            show_help_popup: false,
        }
    }
}
