//! Demo instances
//!
//! A DemoInstance is a concrete deployment of a template for one prospect,
//! carrying its branding, data binding and flow configuration.

use crate::{DemoId, ParseTagError, TemplateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A brandable deployment of a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoInstance {
    /// Unique identifier for this demo
    pub id: DemoId,

    pub name: String,

    pub owner_email: String,

    /// Template this demo was built from
    pub template_id: TemplateId,

    /// Template version in use when the demo was built
    pub template_version: semver::Version,

    pub branding: BrandingPackage,

    pub data_binding: DataBinding,

    pub flow_config: FlowConfig,

    pub status: DemoStatus,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl DemoInstance {
    /// Create a new draft demo stamped with the current time
    pub fn new(
        name: impl Into<String>,
        owner_email: impl Into<String>,
        template_id: TemplateId,
        template_version: semver::Version,
        branding: BrandingPackage,
        data_binding: DataBinding,
        flow_config: FlowConfig,
    ) -> Self {
        Self {
            id: DemoId::generate(),
            name: name.into(),
            owner_email: owner_email.into(),
            template_id,
            template_version,
            branding,
            data_binding,
            flow_config,
            status: DemoStatus::Draft,
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: DemoId) -> Self {
        self.id = id;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_status(mut self, status: DemoStatus) -> Self {
        self.status = status;
        self
    }

    /// Copy this demo's configuration into a fresh draft under a new identity.
    ///
    /// Template reference, branding, data binding and flow configuration are
    /// copied by value; nothing is shared with the source afterwards.
    pub fn duplicate_as(
        &self,
        id: DemoId,
        name: impl Into<String>,
        owner_email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            owner_email: owner_email.into(),
            template_id: self.template_id,
            template_version: self.template_version.clone(),
            branding: self.branding.clone(),
            data_binding: self.data_binding.clone(),
            flow_config: self.flow_config.clone(),
            status: DemoStatus::Draft,
            created_at,
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == DemoStatus::Published
    }
}

/// Demo lifecycle status
///
/// Only `Draft -> Published` is driven by the gate; nothing moves a demo to
/// `Archived` yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl DemoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoStatus::Draft => "draft",
            DemoStatus::Published => "published",
            DemoStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for DemoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DemoStatus {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(DemoStatus::Draft),
            "published" => Ok(DemoStatus::Published),
            "archived" => Ok(DemoStatus::Archived),
            other => Err(ParseTagError::new("demo status", other)),
        }
    }
}

/// Display-only branding for a prospect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandingPackage {
    pub prospect_name: String,

    /// Primary colour, e.g. `#004578`
    pub palette: String,

    pub title: String,

    pub welcome_text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    /// Call-to-action text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
}

impl BrandingPackage {
    pub fn new(
        prospect_name: impl Into<String>,
        palette: impl Into<String>,
        title: impl Into<String>,
        welcome_text: impl Into<String>,
    ) -> Self {
        Self {
            prospect_name: prospect_name.into(),
            palette: palette.into(),
            title: title.into(),
            welcome_text: welcome_text.into(),
            logo_url: None,
            cta_text: None,
        }
    }

    pub fn with_logo_url(mut self, url: impl Into<String>) -> Self {
        self.logo_url = Some(url.into());
        self
    }

    pub fn with_cta_text(mut self, text: impl Into<String>) -> Self {
        self.cta_text = Some(text.into());
        self
    }
}

/// Which data a demo reads and how long it is kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataBinding {
    pub dataset_ids: Vec<String>,

    /// Connector references, e.g. `sharepoint:contracts`
    pub connector_refs: Vec<String>,

    pub metadata_schema: String,

    pub retention_days: u32,
}

impl DataBinding {
    /// Default retention for bound data
    pub const DEFAULT_RETENTION_DAYS: u32 = 14;

    pub fn new<I, S>(dataset_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dataset_ids: dataset_ids.into_iter().map(Into::into).collect(),
            connector_refs: Vec::new(),
            metadata_schema: "default".to_string(),
            retention_days: Self::DEFAULT_RETENTION_DAYS,
        }
    }

    pub fn with_connector_refs<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.connector_refs = refs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_metadata_schema(mut self, schema: impl Into<String>) -> Self {
        self.metadata_schema = schema.into();
        self
    }

    pub fn with_retention_days(mut self, days: u32) -> Self {
        self.retention_days = days;
        self
    }
}

/// How the demo's conversation flow is driven
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowConfig {
    pub mode: String,

    pub presets: Vec<String>,

    /// Free-form parameters passed through to the flow (temperature, ...)
    pub parameters: HashMap<String, serde_json::Value>,

    pub allowed_tools: Vec<String>,
}

impl FlowConfig {
    pub fn new(mode: impl Into<String>) -> Self {
        Self {
            mode: mode.into(),
            presets: Vec::new(),
            parameters: HashMap::new(),
            allowed_tools: vec!["retrieval".to_string()],
        }
    }

    pub fn with_presets<I, S>(mut self, presets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.presets = presets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    pub fn with_allowed_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_tools = tools.into_iter().map(Into::into).collect();
        self
    }
}
