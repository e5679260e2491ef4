//! Entry activation, link menu, pages, subscriptions and publish actions

use crate::clipboard;
use crate::model::{format_for_web, secondary_action, RenderState};
use super::AppController;

impl AppController {
    /// Primary activation of the selected entry: open its page when clickable
    pub async fn activate_selected(&self) {
        let model = self.model.lock().await;
        let Some((_, entry)) = model.get_selected_entry().await else {
            return;
        };
        if !entry.clickable || entry.identifier.is_empty() {
            tracing::trace!(uri = %entry.identifier, "Ignoring activation of inert entry");
            return;
        }

        let path = format_for_web(&entry.identifier);
        tracing::info!(uri = %entry.identifier, path = %path, "Navigating to entry");
        model.push_page(path, entry).await;
    }

    /// Secondary activation: open the copy-link menu when a record exists
    pub async fn open_context_menu(&self) {
        let model = self.model.lock().await;
        let Some((row, entry)) = model.get_selected_entry().await else {
            return;
        };
        match secondary_action(&entry, row, &self.config.share_base_url) {
            Some(menu) => {
                tracing::debug!(uri = %entry.identifier, link = %menu.link, "Opening copy link menu");
                model.open_copy_menu(menu).await;
            }
            None => tracing::trace!(uri = %entry.identifier, "No record yet, no link menu"),
        }
    }

    pub async fn copy_menu_link(&self) {
        let model = self.model.lock().await;
        let Some(menu) = model.get_copy_menu().await else {
            return;
        };
        model.close_copy_menu().await;

        match clipboard::copy_to_clipboard(&menu.link) {
            Ok(()) => model.set_status(format!("Copied {}", menu.link)).await,
            Err(e) => {
                tracing::error!(error = %e, "Failed to copy link");
                model.set_error(Self::format_error(&e)).await;
            }
        }
    }

    pub async fn turn_feed_page(&self, forward: bool) {
        let turned = self.turn_page(forward).await;
        let model = self.model.lock().await;
        match turned {
            Some((page, pages)) => model.set_status(format!("Page {} of {}", page, pages)).await,
            None => model.set_status(if forward { "Last page" } else { "First page" }).await,
        }
    }

    pub async fn navigate_back(&self) {
        let model = self.model.lock().await;
        if model.navigate_back().await {
            tracing::debug!("Navigated back");
        }
    }

    pub async fn toggle_selected_subscription(&self) {
        let model = self.model.lock().await;
        let Some((_, entry)) = model.get_selected_entry().await else {
            return;
        };
        if let RenderState::Channel { claim, .. } = &entry.state {
            let subscribed = model.toggle_subscription(&entry.identifier).await;
            let verb = if subscribed { "Subscribed to" } else { "Unsubscribed from" };
            model.set_status(format!("{} {}", verb, claim.name)).await;
        }
    }

    /// Evict the selected entry's record so it resolves again
    pub async fn refresh_selected(&self) {
        let model = self.model.lock().await;
        if let Some((_, entry)) = model.get_selected_entry().await {
            self.store.evict(&entry.identifier).await;
            model.set_status(format!("Refreshing {}", entry.identifier)).await;
        }
    }

    /// Open the selected owned file in the publish card for editing
    pub async fn edit_selected(&self) {
        let model = self.model.lock().await;
        let Some((_, entry)) = model.get_selected_entry().await else {
            return;
        };
        match &entry.state {
            RenderState::File { claim: Some(claim), .. } if entry.owned_by_viewer => {
                tracing::debug!(uri = %entry.identifier, "Editing existing claim");
                model.edit_existing_claim(&claim.name).await;
            }
            _ => model.set_status("Only your own uploads can be edited").await,
        }
    }

    pub async fn choose_publish_file(&self) {
        let model = self.model.lock().await;
        if model.get_publish_draft().await.is_disabled() {
            model.set_status("Publishing needs a positive balance").await;
            return;
        }
        if let Some(file_name) = model.choose_publish_file().await {
            tracing::info!(file_name = %file_name, "Publish file chosen");
            model.set_status(format!("Selected {}", file_name)).await;
        }
    }
}
