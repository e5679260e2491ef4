//! Render pass over the feed: derive every entry, then run resolve effects

use futures::future::join_all;

use crate::model::{derive, ClaimStore, EntryProps, EntryRender, EntryStateResolver, FeedEntry};
use super::{AppController, FeedSlot, FeedWindow};

/// Number of pages needed for `len` entries; an empty feed still has one
pub(crate) fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

impl FeedWindow {
    /// Point the slots at the entries of `page`, reusing existing resolvers
    pub(crate) fn show_page(&mut self, page: usize, feed: &[FeedEntry], page_size: usize, store: &ClaimStore) {
        let page_size = page_size.max(1);
        let start = (page * page_size).min(feed.len());
        let end = (start + page_size).min(feed.len());
        let entries = &feed[start..end];

        self.page = page;
        self.slots.truncate(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            match self.slots.get_mut(i) {
                Some(slot) => {
                    slot.entry = entry.clone();
                    slot.resolver.set_identifier(entry.uri());
                }
                None => self.slots.push(FeedSlot {
                    resolver: EntryStateResolver::new(store.clone(), entry.uri()),
                    entry: entry.clone(),
                }),
            }
        }
    }
}

impl AppController {
    /// Move the feed window by one page. Returns the new (page, pages),
    /// 1-based, or None when already at the edge.
    pub async fn turn_page(&self, forward: bool) -> Option<(usize, usize)> {
        let page_size = usize::from(self.config.page_size);
        let pages = page_count(self.catalog.feed().len(), page_size);

        let mut window = self.feed.lock().await;
        let target = if forward {
            Some(window.page + 1).filter(|&p| p < pages)
        } else {
            window.page.checked_sub(1)
        };
        let target = target?;
        window.show_page(target, self.catalog.feed(), page_size, &self.store);
        drop(window);

        tracing::debug!(page = target + 1, pages, "Feed page turned");
        Some((target + 1, pages))
    }

    /// Recompute all entries from fresh store snapshots and publish the
    /// visible ones to the model. Returns how many resolves were issued.
    pub async fn sync_feed(&self) -> usize {
        let ui_state = self.model.lock().await.get_ui_state().await;
        let mut window = self.feed.lock().await;
        let feed_page = (
            window.page + 1,
            page_count(self.catalog.feed().len(), usize::from(self.config.page_size)),
        );

        let snapshots = join_all(window.slots.iter().map(|slot| slot.resolver.snapshot())).await;

        let mut visible: Vec<EntryRender> = Vec::with_capacity(window.slots.len());
        let mut issued = 0;
        for (slot, snapshot) in window.slots.iter_mut().zip(snapshots) {
            let resolution = slot.resolver.resolution(&snapshot);
            let owned_by_viewer = resolution
                .claim()
                .is_some_and(|claim| claim.is_owned_by(&self.config.my_channels));

            let props = EntryProps {
                identifier: slot.resolver.identifier().to_string(),
                resolution,
                obscure_adult_content: ui_state.obscure_nsfw,
                owned_by_viewer,
                pending: self.catalog.is_pending(slot.entry.uri()),
                override_title: slot.entry.title().map(str::to_string),
                override_thumbnail: slot.entry.thumbnail().map(str::to_string),
                display_mode: ui_state.display_mode,
                show_placeholder_skeleton: ui_state.show_placeholders,
            };
            let render = derive(&props);

            if slot.resolver.run_effects(&snapshot).await {
                issued += 1;
            }
            if !render.state.is_hidden() {
                visible.push(render);
            }
        }
        drop(window);

        let stats = self.store.stats().await;
        self.model.lock().await.set_entries(visible, stats, feed_page).await;
        issued
    }
}
