//! Externally hosted assistant app registrations

use crate::AppId;
use serde::{Deserialize, Serialize};

/// Registration of an assistant app hosted outside Demo Studio
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatGptAppRecord {
    pub id: AppId,
    pub name: String,
    pub description: String,
    pub deep_link_url: String,
    pub usage_instructions: String,
    /// What the presenter says while showing the app
    pub talk_track: String,
    pub owner_email: String,
    pub tags: Vec<String>,
    pub recommended_prompts: Vec<String>,
    /// Free-form lifecycle label; no transitions are defined for it
    pub lifecycle_status: String,
}

impl ChatGptAppRecord {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        deep_link_url: impl Into<String>,
        usage_instructions: impl Into<String>,
        talk_track: impl Into<String>,
        owner_email: impl Into<String>,
    ) -> Self {
        Self {
            id: AppId::generate(),
            name: name.into(),
            description: description.into(),
            deep_link_url: deep_link_url.into(),
            usage_instructions: usage_instructions.into(),
            talk_track: talk_track.into(),
            owner_email: owner_email.into(),
            tags: Vec::new(),
            recommended_prompts: Vec::new(),
            lifecycle_status: "draft".to_string(),
        }
    }

    pub fn with_id(mut self, id: AppId) -> Self {
        self.id = id;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_recommended_prompts<I, S>(mut self, prompts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recommended_prompts = prompts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_lifecycle_status(mut self, status: impl Into<String>) -> Self {
        self.lifecycle_status = status.into();
        self
    }
}
