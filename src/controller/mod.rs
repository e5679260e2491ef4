//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and drives claim resolution.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `feed`: Per-tick render pass over feed entries (derivation + lazy resolves)
//! - `navigation`: Entry activation, link menu, pages, subscriptions, publish

mod input;
mod feed;
mod navigation;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::model::{AppModel, Catalog, ClaimStore, EntryStateResolver, FeedEntry};

/// One feed row and the resolver that keeps its record fresh
pub(crate) struct FeedSlot {
    pub(crate) entry: FeedEntry,
    pub(crate) resolver: EntryStateResolver<ClaimStore>,
}

/// The page of the feed currently on screen. Slots are reused across pages.
pub(crate) struct FeedWindow {
    pub(crate) page: usize,
    pub(crate) slots: Vec<FeedSlot>,
}

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) store: ClaimStore,
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) config: Arc<AppConfig>,
    feed: Arc<Mutex<FeedWindow>>,
}

impl AppController {
    pub fn new(
        model: Arc<Mutex<AppModel>>,
        store: ClaimStore,
        catalog: Arc<Catalog>,
        config: Arc<AppConfig>,
    ) -> Self {
        let mut window = FeedWindow { page: 0, slots: Vec::new() };
        window.show_page(0, catalog.feed(), usize::from(config.page_size), &store);

        Self {
            model,
            store,
            catalog,
            config,
            feed: Arc::new(Mutex::new(window)),
        }
    }

    pub(crate) fn format_error(error: &anyhow::Error) -> String {
        format!("Error: {}", error)
    }
}
