//! Registry error types

use demo_studio_types::DemoId;
use thiserror::Error;

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Demo not found: {0}")]
    DemoNotFound(DemoId),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
