//! Guest access grants
//!
//! A grant is issued once against a published demo and afterwards only ever
//! revoked. Its usage ceilings are declared data; nothing in this workspace
//! meters sessions or tokens against them.

use crate::{DemoId, GrantId, ParseTagError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Days a grant stays valid unless an explicit expiry is given
pub const DEFAULT_GRANT_TTL_DAYS: i64 = 14;

/// Time and usage bounded external access to a published demo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestAccessGrant {
    /// Unique identifier for this grant
    pub id: GrantId,

    /// Demo the grant opens up
    pub demo_id: DemoId,

    pub access_mode: AccessMode,

    pub issued_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,

    pub allowed_emails: Vec<String>,

    pub allowed_domains: Vec<String>,

    pub limits: UsageLimits,

    pub safe_mode: SafeDemoMode,

    pub revoked: bool,
}

impl GuestAccessGrant {
    /// Create a grant issued now with default limits and safe mode
    pub fn new(demo_id: DemoId, access_mode: AccessMode) -> Self {
        Self::new_at(demo_id, access_mode, Utc::now())
    }

    /// Create a grant issued at `issued_at`, expiring after the default TTL
    pub fn new_at(demo_id: DemoId, access_mode: AccessMode, issued_at: DateTime<Utc>) -> Self {
        Self {
            id: GrantId::generate(),
            demo_id,
            access_mode,
            issued_at,
            expires_at: issued_at + Duration::days(DEFAULT_GRANT_TTL_DAYS),
            allowed_emails: Vec::new(),
            allowed_domains: Vec::new(),
            limits: UsageLimits::default(),
            safe_mode: SafeDemoMode::default(),
            revoked: false,
        }
    }

    pub fn with_id(mut self, id: GrantId) -> Self {
        self.id = id;
        self
    }

    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }

    pub fn with_allowed_emails<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_emails = emails.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_allowed_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_domains = domains.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_limits(mut self, limits: UsageLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_safe_mode(mut self, safe_mode: SafeDemoMode) -> Self {
        self.safe_mode = safe_mode;
        self
    }

    /// Not revoked and not yet expired at `now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && now < self.expires_at
    }
}

/// How a guest reaches the demo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    InviteOnly,
    TokenLink,
}

impl AccessMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessMode::InviteOnly => "invite_only",
            AccessMode::TokenLink => "token_link",
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessMode {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invite_only" => Ok(AccessMode::InviteOnly),
            "token_link" => Ok(AccessMode::TokenLink),
            other => Err(ParseTagError::new("access mode", other)),
        }
    }
}

/// Declared usage ceilings for a grant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageLimits {
    pub max_sessions: u32,
    pub max_requests_per_session: u32,
    pub max_daily_tokens: u64,
    pub max_daily_cost_usd: f64,
}

impl Default for UsageLimits {
    fn default() -> Self {
        Self {
            max_sessions: 3,
            max_requests_per_session: 50,
            max_daily_tokens: 50_000,
            max_daily_cost_usd: 10.0,
        }
    }
}

/// Safety policy applied to guest sessions.
///
/// Every default leans safe: tools are read-only, exports are off and full
/// transcripts are not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeDemoMode {
    pub enabled: bool,
    pub read_only_tools: bool,
    pub exports_enabled: bool,
    pub limit_verbatim_quoting: bool,
    pub prompt_injection_hardening: bool,
    pub store_full_transcripts: bool,
}

impl Default for SafeDemoMode {
    fn default() -> Self {
        Self {
            enabled: true,
            read_only_tools: true,
            exports_enabled: false,
            limit_verbatim_quoting: true,
            prompt_injection_hardening: true,
            store_full_transcripts: false,
        }
    }
}
