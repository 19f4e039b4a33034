//! Gate error types
//!
//! Three classified kinds reach callers: permission, not-found and
//! validation. `Storage` only appears when a registry backend itself fails.

use crate::operation::Operation;
use demo_studio_registry::RegistryError;
use demo_studio_types::{DemoId, DemoStatus, Role, TemplateId, TemplateStatus};
use std::fmt;
use thiserror::Error;

/// Errors returned by workflow gate operations
#[derive(Debug, Error)]
pub enum GateError {
    #[error("permission denied for {operation}: requires one of [{required}], actor is {actor}")]
    PermissionDenied {
        operation: Operation,
        required: RoleSet,
        actor: Role,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    #[error("validation failed for {operation}: {violation}")]
    Validation {
        operation: Operation,
        violation: Violation,
    },

    #[error("storage error: {0}")]
    Storage(String),
}

impl GateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GateError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            GateError::NotFound { .. } => ErrorKind::NotFound,
            GateError::Validation { .. } => ErrorKind::Validation,
            GateError::Storage(_) => ErrorKind::Storage,
        }
    }

    pub(crate) fn not_found(entity: EntityKind, id: impl fmt::Display) -> Self {
        GateError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<RegistryError> for GateError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::DemoNotFound(id) => GateError::not_found(EntityKind::Demo, id),
            RegistryError::Storage(msg) => GateError::Storage(msg),
        }
    }
}

/// Flat classification of a [`GateError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    PermissionDenied,
    NotFound,
    Validation,
    Storage,
}

/// Kind of entity a lookup was for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Template,
    Demo,
    Grant,
    App,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Template => "template",
            EntityKind::Demo => "demo",
            EntityKind::Grant => "guest access grant",
            EntityKind::App => "chatgpt app",
        };
        f.write_str(name)
    }
}

/// Entity-state precondition that did not hold
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("template {template_id} must be approved, is {status}")]
    TemplateNotApproved {
        template_id: TemplateId,
        status: TemplateStatus,
    },

    #[error("demo {demo_id} must be published, is {status}")]
    DemoNotPublished { demo_id: DemoId, status: DemoStatus },

    #[error("{entity} {id} already exists")]
    AlreadyExists { entity: EntityKind, id: String },
}

/// Roles permitted to perform an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSet(pub Vec<Role>);

impl RoleSet {
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(Role::as_str).collect();
        f.write_str(&names.join(", "))
    }
}

/// Result type for gate operations
pub type Result<T> = std::result::Result<T, GateError>;
