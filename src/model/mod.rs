//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (sections, display modes, UI state)
//! - `claim`: Resolved claim records
//! - `uri`: Claim URI helpers
//! - `catalog`: Claim catalog loaded from disk
//! - `claim_store`: Resolution store (resolved records and in-flight requests)
//! - `entry`: Render-state derivation and lazy resolution for feed entries
//! - `content`: Content view data (feed entries, pages)
//! - `publish`: Publish draft and name derivation
//! - `app_model`: Main application model with state management methods

mod types;
mod claim;
mod uri;
mod catalog;
mod claim_store;
mod entry;
mod content;
mod publish;
mod app_model;

// Re-export all public types for convenient access
pub use types::{ActiveSection, DisplayMode, PublishField, UiState};

pub use catalog::{Catalog, FeedEntry};

pub use claim_store::ClaimStore;

pub use entry::{
    derive, secondary_action, CopyMenu, EntryProps, EntryRender, EntryStateResolver,
    RenderState,
};

pub use content::{ContentState, ContentView, PageDetail};

pub use publish::PublishDraft;

pub use app_model::AppModel;

pub use uri::{format_for_web, normalize as normalize_uri};
