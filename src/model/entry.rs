//! Render-state derivation for a single feed entry
//!
//! An entry is described by its URI plus whatever the resolution store knows
//! about it. Each render recomputes a [`RenderState`] from a fresh snapshot;
//! nothing derived here is cached between renders. The only state an entry
//! keeps is its [`ResolveTrigger`], which decides when to ask the store for
//! a missing record.

use super::claim::{Claim, ClaimKind};
use super::claim_store::ResolutionStore;
use super::types::DisplayMode;
use super::uri;

/// Where an entry's record stands, computed once per render
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Not fetched yet, or a fetch is outstanding
    Pending,
    Resolved(Claim),
    /// A fetch was issued (or observed) and produced nothing
    Abandoned,
}

impl Resolution {
    pub fn classify(claim: Option<Claim>, is_resolving: bool, phase: TriggerPhase) -> Self {
        match claim {
            Some(claim) => Resolution::Resolved(claim),
            None if !is_resolving && phase == TriggerPhase::Waiting => Resolution::Abandoned,
            None => Resolution::Pending,
        }
    }

    pub fn claim(&self) -> Option<&Claim> {
        match self {
            Resolution::Resolved(claim) => Some(claim),
            _ => None,
        }
    }
}

/// What the entry is rendered as
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderState {
    Hidden,
    Placeholder {
        uri: String,
    },
    Channel {
        claim: Claim,
        child_count: u32,
    },
    File {
        claim: Option<Claim>,
        override_title: Option<String>,
        override_thumbnail: Option<String>,
    },
}

impl RenderState {
    pub fn is_hidden(&self) -> bool {
        matches!(self, RenderState::Hidden)
    }

    /// Title with caller overrides taking precedence over the record
    pub fn title(&self) -> &str {
        match self {
            RenderState::Channel { claim, .. } => claim.title.as_deref().unwrap_or(claim.name.as_str()),
            RenderState::File { claim, override_title, .. } => override_title
                .as_deref()
                .filter(|t| !t.is_empty())
                .or_else(|| claim.as_ref().map(|c| c.name.as_str()))
                .unwrap_or(""),
            _ => "",
        }
    }

    pub fn thumbnail(&self) -> Option<&str> {
        match self {
            RenderState::File { claim, override_thumbnail, .. } => override_thumbnail
                .as_deref()
                .or_else(|| claim.as_ref().and_then(|c| c.thumbnail.as_deref())),
            RenderState::Channel { claim, .. } => claim.thumbnail.as_deref(),
            _ => None,
        }
    }

    pub fn claim(&self) -> Option<&Claim> {
        match self {
            RenderState::Channel { claim, .. } => Some(claim),
            RenderState::File { claim, .. } => claim.as_ref(),
            _ => None,
        }
    }
}

/// Everything the derivation looks at
#[derive(Clone, Debug)]
pub struct EntryProps {
    pub identifier: String,
    pub resolution: Resolution,
    pub obscure_adult_content: bool,
    pub owned_by_viewer: bool,
    pub pending: bool,
    pub override_title: Option<String>,
    pub override_thumbnail: Option<String>,
    pub display_mode: DisplayMode,
    pub show_placeholder_skeleton: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryRender {
    pub identifier: String,
    pub state: RenderState,
    pub clickable: bool,
    pub pending: bool,
    pub owned_by_viewer: bool,
    pub display_mode: DisplayMode,
}

/// Derive the render state of an entry. Pure: same props, same output.
pub fn derive(props: &EntryProps) -> EntryRender {
    let state = derive_state(props);
    let clickable = match &state {
        RenderState::Channel { .. } => !props.pending,
        RenderState::File { .. } => !state.title().is_empty() && !props.pending,
        _ => false,
    };

    EntryRender {
        identifier: props.identifier.clone(),
        state,
        clickable,
        pending: props.pending,
        owned_by_viewer: props.owned_by_viewer,
        display_mode: props.display_mode,
    }
}

fn derive_state(props: &EntryProps) -> RenderState {
    if props.identifier.is_empty() {
        return if props.show_placeholder_skeleton {
            RenderState::Placeholder { uri: String::new() }
        } else {
            RenderState::Hidden
        };
    }

    let claim = props.resolution.claim();
    let abandoned = props.resolution == Resolution::Abandoned;
    let adult_hidden = !props.owned_by_viewer
        && props.obscure_adult_content
        && claim.is_some_and(Claim::is_adult);

    if abandoned || adult_hidden {
        return RenderState::Hidden;
    }

    match claim {
        None if props.show_placeholder_skeleton => RenderState::Placeholder {
            uri: props.identifier.clone(),
        },
        Some(claim) if claim.kind() == ClaimKind::Channel => RenderState::Channel {
            claim: claim.clone(),
            child_count: claim.child_count(),
        },
        Some(claim) => RenderState::File {
            claim: Some(claim.clone()),
            override_title: props.override_title.clone(),
            override_thumbnail: props.override_thumbnail.clone(),
        },
        None if props.override_title.as_deref().is_some_and(|t| !t.is_empty()) => {
            RenderState::File {
                claim: None,
                override_title: props.override_title.clone(),
                override_thumbnail: props.override_thumbnail.clone(),
            }
        }
        None => RenderState::Hidden,
    }
}

/// Link-copy menu request produced by a secondary activation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopyMenu {
    pub link: String,
    /// Row of the entry the menu is anchored to
    pub anchor: usize,
}

/// Secondary activation: offer the share link when a record exists
pub fn secondary_action(render: &EntryRender, anchor: usize, share_base: &str) -> Option<CopyMenu> {
    render.state.claim().map(|claim| CopyMenu {
        link: uri::share_link(share_base, &claim.permanent_url),
        anchor,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerPhase {
    /// A resolve may be issued
    Armed,
    /// A resolve was issued or observed in flight; wait for a record
    Waiting,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct TriggerDeps {
    is_resolving: bool,
    identifier: String,
    not_yet_fetched: bool,
}

/// Level-triggered resolve rule keyed on (is_resolving, identifier, not_yet_fetched)
#[derive(Clone, Debug)]
pub struct ResolveTrigger {
    last: Option<TriggerDeps>,
    phase: TriggerPhase,
}

impl Default for ResolveTrigger {
    fn default() -> Self {
        Self {
            last: None,
            phase: TriggerPhase::Armed,
        }
    }
}

impl ResolveTrigger {
    pub fn phase(&self) -> TriggerPhase {
        self.phase
    }

    /// Feed the current dependencies; returns true when a resolve must be issued
    pub fn observe(&mut self, is_resolving: bool, identifier: &str, not_yet_fetched: bool) -> bool {
        let deps = TriggerDeps {
            is_resolving,
            identifier: identifier.to_string(),
            not_yet_fetched,
        };
        if self.last.as_ref() == Some(&deps) {
            return false;
        }

        let identifier_changed = self
            .last
            .as_ref()
            .is_some_and(|last| last.identifier != deps.identifier);
        if identifier_changed || !not_yet_fetched {
            self.phase = TriggerPhase::Armed;
        }

        let mut fire = false;
        if not_yet_fetched {
            if is_resolving {
                self.phase = TriggerPhase::Waiting;
            } else if self.phase == TriggerPhase::Armed && !identifier.is_empty() {
                self.phase = TriggerPhase::Waiting;
                fire = true;
            }
        }

        self.last = Some(deps);
        fire
    }
}

/// Store view of one entry, valid for a single render
#[derive(Clone, Debug, Default)]
pub struct EntrySnapshot {
    pub claim: Option<Claim>,
    pub is_resolving: bool,
}

/// Per-entry resolver: reads the injected store and issues lazy resolves
pub struct EntryStateResolver<S> {
    store: S,
    identifier: String,
    trigger: ResolveTrigger,
}

impl<S: ResolutionStore> EntryStateResolver<S> {
    pub fn new(store: S, identifier: impl Into<String>) -> Self {
        Self {
            store,
            identifier: identifier.into(),
            trigger: ResolveTrigger::default(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Point the resolver at another entry. The trigger starts over so the
    /// new entry reads as Pending until its own request is observed.
    pub fn set_identifier(&mut self, identifier: impl Into<String>) {
        let identifier = identifier.into();
        if identifier != self.identifier {
            self.identifier = identifier;
            self.trigger = ResolveTrigger::default();
        }
    }

    pub async fn snapshot(&self) -> EntrySnapshot {
        if self.identifier.is_empty() {
            return EntrySnapshot::default();
        }
        EntrySnapshot {
            claim: self.store.lookup(&self.identifier).await,
            is_resolving: self.store.is_resolving(&self.identifier).await,
        }
    }

    pub fn resolution(&self, snapshot: &EntrySnapshot) -> Resolution {
        Resolution::classify(snapshot.claim.clone(), snapshot.is_resolving, self.trigger.phase())
    }

    /// Run the lazy-resolve rule against a snapshot. Returns whether a
    /// resolve was issued.
    pub async fn run_effects(&mut self, snapshot: &EntrySnapshot) -> bool {
        let not_yet_fetched = snapshot.claim.is_none();
        let fire = self
            .trigger
            .observe(snapshot.is_resolving, &self.identifier, not_yet_fetched);
        if fire {
            tracing::debug!(uri = %self.identifier, "Entry requesting resolution");
            self.store.resolve(&self.identifier).await;
        }
        fire
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::claim::fixtures::{channel, file};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    fn props(identifier: &str, resolution: Resolution) -> EntryProps {
        EntryProps {
            identifier: identifier.to_string(),
            resolution,
            obscure_adult_content: true,
            owned_by_viewer: false,
            pending: false,
            override_title: None,
            override_thumbnail: None,
            display_mode: DisplayMode::Normal,
            show_placeholder_skeleton: true,
        }
    }

    fn adult(mut claim: Claim) -> Claim {
        claim.nsfw = true;
        claim
    }

    #[derive(Clone, Default)]
    struct FakeStore {
        inner: Arc<Mutex<FakeInner>>,
    }

    #[derive(Default)]
    struct FakeInner {
        claims: HashMap<String, Claim>,
        resolving: Vec<String>,
        calls: Vec<String>,
    }

    impl FakeStore {
        fn calls(&self) -> Vec<String> {
            self.inner.lock().unwrap().calls.clone()
        }

        fn complete(&self, uri: &str, claim: Option<Claim>) {
            let mut inner = self.inner.lock().unwrap();
            inner.resolving.retain(|u| u != uri);
            if let Some(claim) = claim {
                inner.claims.insert(uri.to_string(), claim);
            }
        }

        fn evict(&self, uri: &str) {
            self.inner.lock().unwrap().claims.remove(uri);
        }
    }

    #[async_trait]
    impl ResolutionStore for FakeStore {
        async fn resolve(&self, uri: &str) {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push(uri.to_string());
            if !inner.resolving.iter().any(|u| u == uri) {
                inner.resolving.push(uri.to_string());
            }
        }

        async fn is_resolving(&self, uri: &str) -> bool {
            self.inner.lock().unwrap().resolving.iter().any(|u| u == uri)
        }

        async fn lookup(&self, uri: &str) -> Option<Claim> {
            self.inner.lock().unwrap().claims.get(uri).cloned()
        }
    }

    /// One render pass: snapshot, derive, then effects
    async fn render_pass(resolver: &mut EntryStateResolver<FakeStore>, placeholder: bool) -> EntryRender {
        let snapshot = resolver.snapshot().await;
        let mut p = props(resolver.identifier(), resolver.resolution(&snapshot));
        p.show_placeholder_skeleton = placeholder;
        let render = derive(&p);
        resolver.run_effects(&snapshot).await;
        render
    }

    #[test]
    fn adult_content_hidden_for_any_kind() {
        for claim in [adult(file("doc")), adult(channel("@chan", Some(2)))] {
            let render = derive(&props("lbry://x", Resolution::Resolved(claim)));
            assert_eq!(render.state, RenderState::Hidden);
            assert!(!render.clickable);
        }
    }

    #[test]
    fn owner_sees_own_adult_content() {
        let mut p = props("lbry://doc", Resolution::Resolved(adult(file("doc"))));
        p.owned_by_viewer = true;
        assert!(!derive(&p).state.is_hidden());

        let mut p = props("lbry://doc", Resolution::Resolved(adult(file("doc"))));
        p.obscure_adult_content = false;
        assert!(!derive(&p).state.is_hidden());
    }

    #[test]
    fn channel_exposes_count_defaulting_to_zero() {
        let render = derive(&props("@chan", Resolution::Resolved(channel("@chan", None))));
        match render.state {
            RenderState::Channel { child_count, ref claim } => {
                assert_eq!(child_count, 0);
                assert_eq!(claim.name, "@chan");
            }
            other => panic!("expected channel, got {:?}", other),
        }

        let render = derive(&props("@chan", Resolution::Resolved(channel("Chan", Some(5)))));
        assert!(matches!(render.state, RenderState::Channel { child_count: 5, .. }));
        assert!(render.clickable);
    }

    #[test]
    fn derivation_is_pure() {
        let p = props("doc", Resolution::Resolved(file("Doc")));
        assert_eq!(derive(&p), derive(&p));
    }

    #[test]
    fn pending_entries_are_not_clickable() {
        let mut p = props("doc", Resolution::Resolved(file("doc")));
        p.override_title = Some("X".to_string());
        p.pending = true;
        let render = derive(&p);

        assert_eq!(render.state.title(), "X");
        assert!(!render.clickable);
    }

    #[test]
    fn title_precedence_override_then_name() {
        let mut p = props("doc", Resolution::Resolved(file("name")));
        assert_eq!(derive(&p).state.title(), "name");

        p.override_title = Some(String::new());
        assert_eq!(derive(&p).state.title(), "name");

        p.override_title = Some("Custom".to_string());
        p.override_thumbnail = Some("thumb.png".to_string());
        let render = derive(&p);
        assert_eq!(render.state.title(), "Custom");
        assert_eq!(render.state.thumbnail(), Some("thumb.png"));
    }

    #[test]
    fn override_title_renders_file_before_record_arrives() {
        let mut p = props("doc", Resolution::Pending);
        p.show_placeholder_skeleton = false;
        assert_eq!(derive(&p).state, RenderState::Hidden);

        p.override_title = Some("Coming soon".to_string());
        let render = derive(&p);
        assert!(matches!(render.state, RenderState::File { claim: None, .. }));
        assert!(render.clickable);
    }

    #[test]
    fn abandoned_entries_are_hidden_even_with_placeholders() {
        let render = derive(&props("gone", Resolution::Abandoned));
        assert_eq!(render.state, RenderState::Hidden);
    }

    #[test]
    fn empty_identifier_only_renders_requested_placeholder() {
        let render = derive(&props("", Resolution::Pending));
        assert_eq!(render.state, RenderState::Placeholder { uri: String::new() });
        assert!(!render.clickable);

        let mut p = props("", Resolution::Pending);
        p.show_placeholder_skeleton = false;
        assert_eq!(derive(&p).state, RenderState::Hidden);
    }

    #[test]
    fn secondary_action_needs_a_record() {
        let placeholder = derive(&props("doc", Resolution::Pending));
        assert_eq!(secondary_action(&placeholder, 0, "https://open.lbry.com"), None);

        let resolved = derive(&props("doc", Resolution::Resolved(file("doc"))));
        let menu = secondary_action(&resolved, 3, "https://open.lbry.com").unwrap();
        assert_eq!(menu.link, "https://open.lbry.com/doc:f00d");
        assert_eq!(menu.anchor, 3);
    }

    #[test]
    fn trigger_ignores_unchanged_dependencies() {
        let mut trigger = ResolveTrigger::default();
        assert!(trigger.observe(false, "abc", true));
        assert!(!trigger.observe(false, "abc", true));
        assert!(!trigger.observe(false, "abc", true));
    }

    #[test]
    fn trigger_does_not_retry_after_empty_answer() {
        let mut trigger = ResolveTrigger::default();
        assert!(trigger.observe(false, "abc", true));
        assert!(!trigger.observe(true, "abc", true));
        assert!(!trigger.observe(false, "abc", true));
        assert_eq!(trigger.phase(), TriggerPhase::Waiting);
    }

    #[test]
    fn trigger_rearms_on_record_and_identifier_change() {
        let mut trigger = ResolveTrigger::default();
        assert!(trigger.observe(false, "abc", true));
        assert!(!trigger.observe(false, "abc", false));
        // Evicted
        assert!(trigger.observe(false, "abc", true));

        assert!(trigger.observe(false, "def", true));
        assert!(!trigger.observe(false, "", true));
    }

    #[tokio::test]
    async fn resolves_once_across_repeated_renders() {
        let store = FakeStore::default();
        let mut resolver = EntryStateResolver::new(store.clone(), "abc");

        for _ in 0..5 {
            render_pass(&mut resolver, true).await;
        }
        assert_eq!(store.calls(), vec!["abc".to_string()]);
    }

    #[tokio::test]
    async fn placeholder_then_file_once_store_answers() {
        let store = FakeStore::default();
        let mut resolver = EntryStateResolver::new(store.clone(), "abc");

        let first = render_pass(&mut resolver, true).await;
        assert_eq!(first.state, RenderState::Placeholder { uri: "abc".to_string() });
        assert!(!first.clickable);

        // In flight: still a placeholder, no second request
        let second = render_pass(&mut resolver, true).await;
        assert!(matches!(second.state, RenderState::Placeholder { .. }));
        assert_eq!(store.calls().len(), 1);

        store.complete("abc", Some(file("Doc")));
        let resolved = render_pass(&mut resolver, true).await;
        assert!(matches!(resolved.state, RenderState::File { .. }));
        assert_eq!(resolved.state.title(), "Doc");
        assert!(resolved.clickable);
    }

    #[tokio::test]
    async fn empty_answer_hides_entry_without_retrying() {
        let store = FakeStore::default();
        let mut resolver = EntryStateResolver::new(store.clone(), "gone");

        render_pass(&mut resolver, true).await;
        store.complete("gone", None);

        let render = render_pass(&mut resolver, true).await;
        assert_eq!(render.state, RenderState::Hidden);
        render_pass(&mut resolver, true).await;
        assert_eq!(store.calls().len(), 1);
    }

    #[tokio::test]
    async fn entries_sharing_a_uri_wait_on_one_request() {
        let store = FakeStore::default();
        let mut first = EntryStateResolver::new(store.clone(), "abc");
        let mut second = EntryStateResolver::new(store.clone(), "abc");

        render_pass(&mut first, true).await;
        render_pass(&mut second, true).await;
        store.complete("abc", None);
        let a = render_pass(&mut first, true).await;
        let b = render_pass(&mut second, true).await;

        assert_eq!(store.calls().len(), 1);
        assert!(a.state.is_hidden() && b.state.is_hidden());
    }

    #[tokio::test]
    async fn eviction_triggers_a_new_resolution() {
        let store = FakeStore::default();
        let mut resolver = EntryStateResolver::new(store.clone(), "abc");

        render_pass(&mut resolver, true).await;
        store.complete("abc", Some(file("Doc")));
        render_pass(&mut resolver, true).await;

        store.evict("abc");
        let render = render_pass(&mut resolver, true).await;
        assert!(matches!(render.state, RenderState::Placeholder { .. }));
        assert_eq!(store.calls().len(), 2);
    }

    #[tokio::test]
    async fn empty_identifier_never_resolves() {
        let store = FakeStore::default();
        let mut resolver = EntryStateResolver::new(store.clone(), "");

        let render = render_pass(&mut resolver, true).await;
        assert!(matches!(render.state, RenderState::Placeholder { .. }));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn changing_identifier_resolves_the_new_one() {
        let store = FakeStore::default();
        let mut resolver = EntryStateResolver::new(store.clone(), "abc");

        render_pass(&mut resolver, true).await;
        resolver.set_identifier("def");
        let render = render_pass(&mut resolver, true).await;

        assert_eq!(render.state, RenderState::Placeholder { uri: "def".to_string() });
        assert_eq!(store.calls(), vec!["abc".to_string(), "def".to_string()]);
    }

    #[tokio::test]
    async fn switching_away_from_an_abandoned_entry_starts_pending() {
        let store = FakeStore::default();
        let mut resolver = EntryStateResolver::new(store.clone(), "gone");

        render_pass(&mut resolver, false).await;
        store.complete("gone", None);
        assert!(render_pass(&mut resolver, false).await.state.is_hidden());

        resolver.set_identifier("next");
        let snapshot = resolver.snapshot().await;
        assert_eq!(resolver.resolution(&snapshot), Resolution::Pending);

        // Same identifier again keeps the trigger where it was
        resolver.run_effects(&snapshot).await;
        resolver.set_identifier("next");
        assert_eq!(resolver.resolution(&snapshot), Resolution::Abandoned);
    }
}
