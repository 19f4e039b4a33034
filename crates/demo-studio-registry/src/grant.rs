//! Grant registry trait

use crate::error::Result;
use demo_studio_types::{DemoId, GrantId, GuestAccessGrant};

/// Registry for guest access grants
pub trait GrantRegistry: Send + Sync {
    /// Get a grant by ID
    fn get_grant(&self, id: &GrantId) -> Result<Option<GuestAccessGrant>>;

    /// Insert or replace a grant by its ID
    fn upsert_grant(&self, grant: GuestAccessGrant) -> Result<()>;

    /// List all grants issued against a demo
    fn list_grants_for_demo(&self, demo_id: &DemoId) -> Result<Vec<GuestAccessGrant>>;
}
