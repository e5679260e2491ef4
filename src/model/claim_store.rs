//! Resolution store: shared resolved claims and in-flight resolutions

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::catalog::ClaimSource;
use super::claim::Claim;
use super::uri;

/// What a list entry needs from the store that owns resolved records
#[async_trait]
pub trait ResolutionStore: Send + Sync {
    /// Request resolution of `uri`. Returns immediately; duplicate requests
    /// for a URI already in flight are coalesced.
    async fn resolve(&self, uri: &str);

    async fn is_resolving(&self, uri: &str) -> bool;

    async fn lookup(&self, uri: &str) -> Option<Claim>;
}

/// Resolution store backed by a [`ClaimSource`]
#[derive(Clone)]
pub struct ClaimStore {
    claims: Arc<RwLock<HashMap<String, Claim>>>,
    resolving: Arc<RwLock<HashSet<String>>>,
    source: Arc<dyn ClaimSource>,
    latency: Duration,
}

impl ClaimStore {
    pub fn new(source: Arc<dyn ClaimSource>, latency: Duration) -> Self {
        Self {
            claims: Arc::new(RwLock::new(HashMap::new())),
            resolving: Arc::new(RwLock::new(HashSet::new())),
            source,
            latency,
        }
    }

    /// Drop a resolved record so the next lookup misses
    pub async fn evict(&self, uri: &str) {
        let key = uri::normalize(uri);
        if self.claims.write().await.remove(&key).is_some() {
            tracing::debug!(uri = %key, "Evicted resolved claim");
        }
    }

    /// (resolved, in flight) counts for the status bar
    pub async fn stats(&self) -> (usize, usize) {
        // One lock at a time; `resolve` nests `claims` inside `resolving`
        let resolved = self.claims.read().await.len();
        let in_flight = self.resolving.read().await.len();
        (resolved, in_flight)
    }

    async fn finish(&self, key: String, result: anyhow::Result<Option<Claim>>) {
        crate::log_resolve_result!(key, result);
        if let Ok(Some(claim)) = result {
            self.claims.write().await.insert(key.clone(), claim);
        }
        self.resolving.write().await.remove(&key);
    }
}

#[async_trait]
impl ResolutionStore for ClaimStore {
    async fn resolve(&self, uri: &str) {
        let key = uri::normalize(uri);
        if key.is_empty() {
            return;
        }

        {
            // Records are checked under the in-flight lock; `finish` stores
            // the record before it clears the flag
            let mut resolving = self.resolving.write().await;
            if self.claims.read().await.contains_key(&key) {
                return;
            }
            if !resolving.insert(key.clone()) {
                tracing::trace!(uri = %key, "Resolve coalesced with in-flight request");
                return;
            }
        }

        crate::log_resolve_request!(key);
        let store = self.clone();
        tokio::spawn(async move {
            if !store.latency.is_zero() {
                tokio::time::sleep(store.latency).await;
            }
            let result = store.source.fetch(&key).await;
            store.finish(key, result).await;
        });
    }

    async fn is_resolving(&self, uri: &str) -> bool {
        self.resolving.read().await.contains(&uri::normalize(uri))
    }

    async fn lookup(&self, uri: &str) -> Option<Claim> {
        self.claims.read().await.get(&uri::normalize(uri)).cloned()
    }
}
