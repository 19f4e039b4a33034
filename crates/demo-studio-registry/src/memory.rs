//! In-memory implementation of the registry traits
//!
//! Suitable for development and testing. Nothing here survives a restart.

use crate::app::AppRegistry;
use crate::demo::DemoRegistry;
use crate::error::Result;
use crate::grant::GrantRegistry;
use crate::template::TemplateRegistry;
use dashmap::DashMap;
use demo_studio_types::{
    AnalyticsSnapshot, AppId, ChatGptAppRecord, DemoId, DemoInstance, GrantId, GuestAccessGrant,
    Template, TemplateId,
};

/// In-memory store backing every studio registry
pub struct InMemoryStudioStore {
    templates: DashMap<TemplateId, Template>,
    demos: DashMap<DemoId, DemoInstance>,
    analytics: DashMap<DemoId, AnalyticsSnapshot>,
    grants: DashMap<GrantId, GuestAccessGrant>,
    grants_by_demo: DashMap<DemoId, Vec<GrantId>>,
    apps: DashMap<AppId, ChatGptAppRecord>,
}

impl InMemoryStudioStore {
    pub fn new() -> Self {
        Self {
            templates: DashMap::new(),
            demos: DashMap::new(),
            analytics: DashMap::new(),
            grants: DashMap::new(),
            grants_by_demo: DashMap::new(),
            apps: DashMap::new(),
        }
    }
}

impl Default for InMemoryStudioStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRegistry for InMemoryStudioStore {
    fn get_template(&self, id: &TemplateId) -> Result<Option<Template>> {
        Ok(self.templates.get(id).map(|t| t.clone()))
    }

    fn upsert_template(&self, template: Template) -> Result<()> {
        self.templates.insert(template.id, template);
        Ok(())
    }

    fn list_templates(&self) -> Result<Vec<Template>> {
        Ok(self.templates.iter().map(|t| t.value().clone()).collect())
    }
}

impl DemoRegistry for InMemoryStudioStore {
    fn get_demo(&self, id: &DemoId) -> Result<Option<DemoInstance>> {
        Ok(self.demos.get(id).map(|d| d.clone()))
    }

    fn upsert_demo(&self, demo: DemoInstance) -> Result<()> {
        self.demos.insert(demo.id, demo);
        Ok(())
    }

    fn list_demos(&self) -> Result<Vec<DemoInstance>> {
        Ok(self.demos.iter().map(|d| d.value().clone()).collect())
    }

    fn get_analytics(&self, demo_id: &DemoId) -> Result<Option<AnalyticsSnapshot>> {
        Ok(self.analytics.get(demo_id).map(|a| a.clone()))
    }

    fn upsert_analytics(&self, snapshot: AnalyticsSnapshot) -> Result<()> {
        self.analytics.insert(snapshot.demo_id, snapshot);
        Ok(())
    }
}

impl GrantRegistry for InMemoryStudioStore {
    fn get_grant(&self, id: &GrantId) -> Result<Option<GuestAccessGrant>> {
        Ok(self.grants.get(id).map(|g| g.clone()))
    }

    fn upsert_grant(&self, grant: GuestAccessGrant) -> Result<()> {
        let id = grant.id;
        let demo_id = grant.demo_id;

        // Re-point the index if an existing grant moved demos
        if let Some(previous) = self.grants.insert(id, grant) {
            if previous.demo_id == demo_id {
                return Ok(());
            }
            if let Some(mut ids) = self.grants_by_demo.get_mut(&previous.demo_id) {
                ids.retain(|g| *g != id);
            }
        }

        // Index by demo
        self.grants_by_demo.entry(demo_id).or_default().push(id);

        Ok(())
    }

    fn list_grants_for_demo(&self, demo_id: &DemoId) -> Result<Vec<GuestAccessGrant>> {
        let mut result = Vec::new();
        if let Some(ids) = self.grants_by_demo.get(demo_id) {
            for id in ids.iter() {
                if let Some(grant) = self.grants.get(id) {
                    result.push(grant.clone());
                }
            }
        }
        Ok(result)
    }
}

impl AppRegistry for InMemoryStudioStore {
    fn get_app(&self, id: &AppId) -> Result<Option<ChatGptAppRecord>> {
        Ok(self.apps.get(id).map(|a| a.clone()))
    }

    fn upsert_app(&self, record: ChatGptAppRecord) -> Result<()> {
        self.apps.insert(record.id, record);
        Ok(())
    }

    fn list_apps(&self) -> Result<Vec<ChatGptAppRecord>> {
        Ok(self.apps.iter().map(|a| a.value().clone()).collect())
    }
}
