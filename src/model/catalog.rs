//! Claim catalog loaded from disk, the data source behind the resolution store

use std::collections::{HashMap, HashSet};
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use super::claim::Claim;
use super::uri;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the resolution store fetches records from
#[async_trait]
pub trait ClaimSource: Send + Sync {
    /// `Ok(None)` means the URI resolved to nothing
    async fn fetch(&self, uri: &str) -> anyhow::Result<Option<Claim>>;
}

/// One row of the feed, optionally carrying display overrides
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FeedEntry {
    Uri(String),
    Detailed {
        uri: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        thumbnail: Option<String>,
    },
}

impl FeedEntry {
    pub fn uri(&self) -> &str {
        match self {
            FeedEntry::Uri(uri) | FeedEntry::Detailed { uri, .. } => uri,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            FeedEntry::Uri(_) => None,
            FeedEntry::Detailed { title, .. } => title.as_deref(),
        }
    }

    pub fn thumbnail(&self) -> Option<&str> {
        match self {
            FeedEntry::Uri(_) => None,
            FeedEntry::Detailed { thumbnail, .. } => thumbnail.as_deref(),
        }
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    feed: Vec<FeedEntry>,
    #[serde(default)]
    claims: HashMap<String, Claim>,
    #[serde(default)]
    pending: Vec<String>,
}

/// In-memory catalog of claims keyed by normalized URI
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    feed: Vec<FeedEntry>,
    claims: HashMap<String, Claim>,
    pending: HashSet<String>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| CatalogError::Parse {
            path: display,
            source,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Ok(Self {
            feed: file.feed,
            claims: file
                .claims
                .into_iter()
                .map(|(key, claim)| (uri::normalize(&key), claim))
                .collect(),
            pending: file.pending.iter().map(|u| uri::normalize(u)).collect(),
        })
    }

    pub fn feed(&self) -> &[FeedEntry] {
        &self.feed
    }

    /// Whether a local, not yet confirmed write exists for the URI
    pub fn is_pending(&self, uri: &str) -> bool {
        self.pending.contains(&uri::normalize(uri))
    }

    pub fn get(&self, uri: &str) -> Option<&Claim> {
        self.claims.get(&uri::normalize(uri))
    }
}

#[async_trait]
impl ClaimSource for Catalog {
    async fn fetch(&self, uri: &str) -> anyhow::Result<Option<Claim>> {
        Ok(self.get(uri).cloned())
    }
}
