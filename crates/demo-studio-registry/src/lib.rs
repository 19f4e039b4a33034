//! Demo Studio Registry - Keyed storage for studio entities
//!
//! This crate provides the storage seam the workflow gate writes through:
//!
//! - **TemplateRegistry**: Templates, with the approved/demo-type filter
//! - **DemoRegistry**: Demo instances, their analytics snapshots and cloning
//! - **GrantRegistry**: Guest access grants
//! - **AppRegistry**: Assistant app registrations
//!
//! Registries hold no business rules. A lookup miss is `Ok(None)`; deciding
//! what a miss means is the caller's job.
//!
//! ## In-Memory vs Persistent
//!
//! [`InMemoryStudioStore`] backs every trait and suits development and tests.
//! A durable backend implements the same traits and plugs into the gate
//! unchanged.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod app;
pub mod demo;
pub mod error;
pub mod grant;
pub mod memory;
pub mod template;

// Re-exports
pub use app::AppRegistry;
pub use demo::{CloneRequest, DemoRegistry};
pub use error::{RegistryError, Result};
pub use grant::GrantRegistry;
pub use memory::InMemoryStudioStore;
pub use template::{TemplateFilter, TemplateRegistry};

/// Every registry a workflow gate needs, behind one object
pub trait StudioRepository: TemplateRegistry + DemoRegistry + GrantRegistry + AppRegistry {}

impl<T> StudioRepository for T where T: TemplateRegistry + DemoRegistry + GrantRegistry + AppRegistry {}
