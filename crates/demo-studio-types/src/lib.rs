//! Demo Studio Types - Entity model for the demo lifecycle
//!
//! Demo Studio manages sales-demo artifacts from blueprint to guest access.
//! This crate holds the records only; every rule about who may change them
//! and when lives in `demo-studio-gate`.
//!
//! ## Key Concepts
//!
//! - **Template**: Reusable blueprint describing a demo's type and flows
//! - **DemoInstance**: A brandable deployment of a template for one prospect
//! - **GuestAccessGrant**: Time and usage bounded access to a published demo
//! - **ChatGptAppRecord**: Registration of an externally hosted assistant app
//! - **AnalyticsSnapshot**: Per-demo counters seeded alongside each demo
//!
//! Construction never fails. Identities and timestamps are either generated
//! or supplied through the `*_at` constructors and [`Clock`] seam.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod analytics;
pub mod app;
pub mod clock;
pub mod demo;
pub mod grant;
pub mod ids;
pub mod role;
pub mod template;

// Re-export main types
pub use analytics::AnalyticsSnapshot;
pub use app::ChatGptAppRecord;
pub use clock::{Clock, FixedClock, SystemClock};
pub use demo::{BrandingPackage, DataBinding, DemoInstance, DemoStatus, FlowConfig};
pub use grant::{AccessMode, GuestAccessGrant, SafeDemoMode, UsageLimits, DEFAULT_GRANT_TTL_DAYS};
pub use ids::{AppId, DemoId, GrantId, TemplateId};
pub use role::Role;
pub use template::{DemoType, Template, TemplateStatus};

use thiserror::Error;

/// Error parsing an enumerated tag from its wire string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} tag: {value}")]
pub struct ParseTagError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseTagError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
