//! App registry trait

use crate::error::Result;
use demo_studio_types::{AppId, ChatGptAppRecord};

/// Registry for assistant app registrations
pub trait AppRegistry: Send + Sync {
    /// Get an app record by ID
    fn get_app(&self, id: &AppId) -> Result<Option<ChatGptAppRecord>>;

    /// Insert or replace an app record by its ID
    fn upsert_app(&self, record: ChatGptAppRecord) -> Result<()>;

    /// List all app records
    fn list_apps(&self) -> Result<Vec<ChatGptAppRecord>>;
}
