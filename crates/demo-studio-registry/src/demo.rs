//! Demo registry trait
//!
//! The DemoRegistry stores demo instances together with the analytics
//! snapshot keyed by the same demo identity.

use crate::error::{RegistryError, Result};
use chrono::{DateTime, Utc};
use demo_studio_types::{AnalyticsSnapshot, DemoId, DemoInstance};

/// Registry for demo instances and their analytics
pub trait DemoRegistry: Send + Sync {
    /// Get a demo by ID
    fn get_demo(&self, id: &DemoId) -> Result<Option<DemoInstance>>;

    /// Insert or replace a demo by its ID
    fn upsert_demo(&self, demo: DemoInstance) -> Result<()>;

    /// List all demos, in no particular order
    fn list_demos(&self) -> Result<Vec<DemoInstance>>;

    /// Get the analytics snapshot for a demo
    fn get_analytics(&self, demo_id: &DemoId) -> Result<Option<AnalyticsSnapshot>>;

    /// Insert or replace an analytics snapshot by its demo ID
    fn upsert_analytics(&self, snapshot: AnalyticsSnapshot) -> Result<()>;

    /// Store a demo and seed an empty analytics snapshot for it
    fn create_demo(&self, demo: DemoInstance) -> Result<DemoInstance> {
        self.upsert_demo(demo.clone())?;
        self.upsert_analytics(AnalyticsSnapshot::empty(demo.id))?;
        Ok(demo)
    }

    /// Copy a stored demo into a fresh draft and store it
    fn clone_demo(&self, source: &DemoId, request: CloneRequest) -> Result<DemoInstance> {
        let original = self
            .get_demo(source)?
            .ok_or(RegistryError::DemoNotFound(*source))?;

        let clone = original.duplicate_as(
            request.id,
            request.name,
            request.owner_email,
            request.created_at,
        );
        self.create_demo(clone)
    }
}

/// Identity, ownership and stamp for a cloned demo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneRequest {
    pub id: DemoId,
    pub name: String,
    pub owner_email: String,
    pub created_at: DateTime<Utc>,
}

impl CloneRequest {
    /// Request a clone with a fresh identity stamped now
    pub fn new(name: impl Into<String>, owner_email: impl Into<String>) -> Self {
        Self::new_at(name, owner_email, Utc::now())
    }

    pub fn new_at(
        name: impl Into<String>,
        owner_email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: DemoId::generate(),
            name: name.into(),
            owner_email: owner_email.into(),
            created_at,
        }
    }

    pub fn with_id(mut self, id: DemoId) -> Self {
        self.id = id;
        self
    }
}
