//! # Demo Studio Workflow Gate
//!
//! Authorization and lifecycle rules for every change to studio entities.
//!
//! ## Overview
//!
//! Each gate operation takes an entity or identifier plus the actor's
//! [`Role`](demo_studio_types::Role) and checks, in this order:
//!
//! 1. the role is allowed to perform the [`Operation`] (`PermissionDenied`)
//! 2. every referenced entity exists (`NotFound`)
//! 3. the entity is in the state the operation needs (`Validation`)
//!
//! Only when all checks pass is anything written. Failures are returned to
//! the caller as a [`GateError`] and never logged here.
//!
//! ## Lifecycles
//!
//! - Template: `draft -> approved`
//! - Demo: `draft -> published`
//! - Grant: `active -> revoked` (revoking twice is a no-op)
//!
//! ## Example
//!
//! ```rust,no_run
//! use demo_studio_gate::WorkflowGate;
//! use demo_studio_types::{DemoType, Role, Template};
//!
//! # fn example() -> demo_studio_gate::Result<()> {
//! let mut gate = WorkflowGate::in_memory();
//!
//! let template = gate.create_template(
//!     Template::new("Document Q&A Starter", "RAG chat", DemoType::DocumentQa, semver::Version::new(1, 0, 0)),
//!     Role::Developer,
//! )?;
//! gate.approve_template(&template.id, Role::Developer)?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod config;
pub mod error;
pub mod gate;
pub mod links;
pub mod operation;

pub use crate::config::{LinkConfig, StudioConfig};
pub use crate::error::{EntityKind, ErrorKind, GateError, Result, RoleSet, Violation};
pub use crate::gate::WorkflowGate;
pub use crate::links::{EmbedChannel, LinkFormatter, ShareLinks};
pub use crate::operation::Operation;
