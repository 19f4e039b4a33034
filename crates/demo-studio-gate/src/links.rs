//! Share link formatting for published demos
//!
//! Links are a pure function of the demo identity and the configured base
//! URL. The gate checks the demo is published before asking for them.

use demo_studio_types::DemoId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Host surface a demo can be embedded in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbedChannel {
    Teams,
    Sharepoint,
}

impl EmbedChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbedChannel::Teams => "teams",
            EmbedChannel::Sharepoint => "sharepoint",
        }
    }
}

impl fmt::Display for EmbedChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sharable URLs for one published demo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLinks {
    pub web_url: String,
    pub teams_embed: String,
    pub sharepoint_embed: String,
}

impl ShareLinks {
    /// Links keyed `web_url`, `teams_embed` and `sharepoint_embed`
    pub fn to_map(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("web_url".to_string(), self.web_url.clone()),
            ("teams_embed".to_string(), self.teams_embed.clone()),
            ("sharepoint_embed".to_string(), self.sharepoint_embed.clone()),
        ])
    }
}

/// Builds share links under a fixed base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFormatter {
    base_url: String,
}

impl LinkFormatter {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Standalone web page for the demo
    pub fn web_url(&self, demo_id: &DemoId) -> String {
        format!("{}/d/{}", self.base_url, demo_id)
    }

    /// Embeddable view of the demo for `channel`
    pub fn embed_url(&self, demo_id: &DemoId, channel: EmbedChannel) -> String {
        format!("{}/embed?demoId={}&channel={}", self.base_url, demo_id, channel)
    }

    pub fn links_for(&self, demo_id: &DemoId) -> ShareLinks {
        ShareLinks {
            web_url: self.web_url(demo_id),
            teams_embed: self.embed_url(demo_id, EmbedChannel::Teams),
            sharepoint_embed: self.embed_url(demo_id, EmbedChannel::Sharepoint),
        }
    }
}
