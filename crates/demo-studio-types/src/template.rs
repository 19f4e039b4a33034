//! Demo templates
//!
//! A Template is the reusable blueprint a demo is built from. Only templates
//! past the draft stage may be bound by a demo.

use crate::{ParseTagError, TemplateId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reusable blueprint describing a demo's type, flows and defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Unique identifier for this template
    pub id: TemplateId,

    /// Human-readable name
    pub name: String,

    pub description: String,

    /// Kind of demo this template produces
    pub demo_type: DemoType,

    /// Semantic version
    pub version: semver::Version,

    /// Delivery channels (web, teams, sharepoint, ...)
    pub channels: Vec<String>,

    pub status: TemplateStatus,

    /// Complexity tag, free-form ("basic", "advanced", ...)
    pub complexity: String,

    pub industry_tags: Vec<String>,

    /// Names of the flows this template wires up
    pub flows: Vec<String>,

    /// Reference to a sample dataset, if the template ships one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_dataset: Option<String>,
}

impl Template {
    /// Create a new draft template with defaults
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        demo_type: DemoType,
        version: semver::Version,
    ) -> Self {
        Self {
            id: TemplateId::generate(),
            name: name.into(),
            description: description.into(),
            demo_type,
            version,
            channels: vec!["web".to_string()],
            status: TemplateStatus::Draft,
            complexity: "basic".to_string(),
            industry_tags: Vec::new(),
            flows: Vec::new(),
            sample_dataset: None,
        }
    }

    pub fn with_id(mut self, id: TemplateId) -> Self {
        self.id = id;
        self
    }

    pub fn with_status(mut self, status: TemplateStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_channels<I, S>(mut self, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.channels = channels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_complexity(mut self, complexity: impl Into<String>) -> Self {
        self.complexity = complexity.into();
        self
    }

    pub fn with_industry_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.industry_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_flows<I, S>(mut self, flows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flows = flows.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sample_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.sample_dataset = Some(dataset.into());
        self
    }
}

/// Fixed set of demo kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoType {
    DocumentQa,
    ContractAnalysis,
    UnstructuredExtraction,
    GeneralWebChat,
    DashboardChat,
    ChatgptApp,
}

impl DemoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoType::DocumentQa => "document_qa",
            DemoType::ContractAnalysis => "contract_analysis",
            DemoType::UnstructuredExtraction => "unstructured_extraction",
            DemoType::GeneralWebChat => "general_web_chat",
            DemoType::DashboardChat => "dashboard_chat",
            DemoType::ChatgptApp => "chatgpt_app",
        }
    }
}

impl fmt::Display for DemoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DemoType {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document_qa" => Ok(DemoType::DocumentQa),
            "contract_analysis" => Ok(DemoType::ContractAnalysis),
            "unstructured_extraction" => Ok(DemoType::UnstructuredExtraction),
            "general_web_chat" => Ok(DemoType::GeneralWebChat),
            "dashboard_chat" => Ok(DemoType::DashboardChat),
            "chatgpt_app" => Ok(DemoType::ChatgptApp),
            other => Err(ParseTagError::new("demo type", other)),
        }
    }
}

/// Template lifecycle status
///
/// `Draft -> Approved` is the only transition the gate performs. `Published`
/// is reachable only by assigning it directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateStatus {
    #[default]
    Draft,
    Approved,
    Published,
}

impl TemplateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateStatus::Draft => "draft",
            TemplateStatus::Approved => "approved",
            TemplateStatus::Published => "published",
        }
    }

    /// Whether a demo may be built on a template in this status
    pub fn is_bindable(&self) -> bool {
        match self {
            TemplateStatus::Draft => false,
            TemplateStatus::Approved | TemplateStatus::Published => true,
        }
    }
}

impl fmt::Display for TemplateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateStatus {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(TemplateStatus::Draft),
            "approved" => Ok(TemplateStatus::Approved),
            "published" => Ok(TemplateStatus::Published),
            other => Err(ParseTagError::new("template status", other)),
        }
    }
}
