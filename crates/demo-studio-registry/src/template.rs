//! Template registry trait
//!
//! The TemplateRegistry stores templates keyed by identity and answers the
//! catalogue query used when picking a blueprint for a new demo.

use crate::error::Result;
use demo_studio_types::{DemoType, Template, TemplateId};

/// Registry for demo templates
pub trait TemplateRegistry: Send + Sync {
    /// Get a template by ID
    fn get_template(&self, id: &TemplateId) -> Result<Option<Template>>;

    /// Insert or replace a template by its ID
    fn upsert_template(&self, template: Template) -> Result<()>;

    /// List all templates, in no particular order
    fn list_templates(&self) -> Result<Vec<Template>>;

    /// List templates matching `filter`, sorted by name
    fn list_templates_filtered(&self, filter: &TemplateFilter) -> Result<Vec<Template>> {
        let mut templates: Vec<Template> = self
            .list_templates()?
            .into_iter()
            .filter(|t| filter.matches(t))
            .collect();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(templates)
    }
}

/// Catalogue query over templates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateFilter {
    /// Keep only approved or published templates
    pub approved_only: bool,

    /// Keep only templates of this demo type
    pub demo_type: Option<DemoType>,
}

impl TemplateFilter {
    /// Filter that keeps everything
    pub fn all() -> Self {
        Self::default()
    }

    /// Templates a demo may currently bind to
    pub fn approved() -> Self {
        Self {
            approved_only: true,
            demo_type: None,
        }
    }

    pub fn with_demo_type(mut self, demo_type: DemoType) -> Self {
        self.demo_type = Some(demo_type);
        self
    }

    pub fn matches(&self, template: &Template) -> bool {
        if self.approved_only && !template.status.is_bindable() {
            return false;
        }
        match self.demo_type {
            Some(demo_type) => template.demo_type == demo_type,
            None => true,
        }
    }
}
