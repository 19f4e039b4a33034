//! Per-demo analytics counters
//!
//! A snapshot is seeded empty whenever a demo is stored for the first time.
//! Nothing in this workspace aggregates into it.

use crate::DemoId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Usage counters for one demo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub demo_id: DemoId,
    pub sessions: u64,
    pub return_visits: u64,
    /// Action name to number of times it was taken
    pub top_actions: HashMap<String, u64>,
    pub errors: u64,
    pub avg_latency_ms: f64,
    pub token_cost_usd: f64,
}

impl AnalyticsSnapshot {
    /// Zeroed snapshot for a demo
    pub fn empty(demo_id: DemoId) -> Self {
        Self {
            demo_id,
            sessions: 0,
            return_visits: 0,
            top_actions: HashMap::new(),
            errors: 0,
            avg_latency_ms: 0.0,
            token_cost_usd: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sessions == 0
            && self.return_visits == 0
            && self.errors == 0
            && self.top_actions.is_empty()
            && self.avg_latency_ms == 0.0
            && self.token_cost_usd == 0.0
    }
}
