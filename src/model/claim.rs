//! Resolved claim records (files and channels)

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

/// Tags that mark a claim as mature content
const MATURE_TAGS: &[&str] = &["porn", "porno", "nsfw", "mature", "xxx", "sex"];

/// What a claim points at
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClaimKind {
    File,
    Channel,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ClaimMeta {
    #[serde(default)]
    pub claims_in_channel: Option<u32>,
}

/// A resolved claim as stored in the resolution store
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Claim {
    pub name: String,
    #[serde(default)]
    pub claim_id: String,
    pub permanent_url: String,
    #[serde(default = "default_value_type")]
    pub value_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub signing_channel: Option<String>,
    #[serde(default)]
    pub release_time: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub nsfw: bool,
    #[serde(default)]
    pub meta: ClaimMeta,
}

fn default_value_type() -> String {
    "stream".to_string()
}

impl Claim {
    pub fn kind(&self) -> ClaimKind {
        match self.value_type.as_str() {
            "channel" => ClaimKind::Channel,
            _ => ClaimKind::File,
        }
    }

    pub fn is_adult(&self) -> bool {
        self.nsfw
            || self
                .tags
                .iter()
                .any(|tag| MATURE_TAGS.contains(&tag.to_lowercase().as_str()))
    }

    /// Number of publishes under a channel, 0 when unknown
    pub fn child_count(&self) -> u32 {
        self.meta.claims_in_channel.unwrap_or(0)
    }

    pub fn released_at(&self) -> Option<DateTime<Utc>> {
        self.release_time
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
    }

    /// Whether the claim is published by (or is) one of the given channels
    pub fn is_owned_by(&self, channels: &[String]) -> bool {
        channels.iter().any(|channel| {
            self.signing_channel.as_deref() == Some(channel.as_str())
                || (self.kind() == ClaimKind::Channel && self.name == *channel)
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn file(name: &str) -> Claim {
        Claim {
            name: name.to_string(),
            claim_id: "f00d".to_string(),
            permanent_url: format!("lbry://{}#f00d", name),
            value_type: "stream".to_string(),
            title: None,
            thumbnail: None,
            signing_channel: None,
            release_time: None,
            tags: vec![],
            nsfw: false,
            meta: ClaimMeta::default(),
        }
    }

    pub fn channel(name: &str, count: Option<u32>) -> Claim {
        Claim {
            value_type: "channel".to_string(),
            meta: ClaimMeta { claims_in_channel: count },
            permanent_url: format!("lbry://{}#c4a7", name),
            claim_id: "c4a7".to_string(),
            ..file(name)
        }
    }
}
