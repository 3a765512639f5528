//! Run configuration — reference date, anomaly policy, and the action table.
//!
//! Everything the pipeline treats as a parameter lives here. Nothing in the
//! stages hard-codes a date or a segment code.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What to do when a customer's most recent purchase postdates the
/// reference date (which would make Recency negative).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecencyAnomalyPolicy {
    /// Fail the run, identifying the offending customer. The default.
    Reject,
    /// Clamp the customer's recency to zero.
    ClampToZero,
    /// Pass the negative recency through to classification unchanged.
    AllowNegative,
}

/// Segment code → recommended marketing action. Lookups are exact and
/// case-sensitive; a code with no entry means "no defined action".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionPolicy {
    actions: HashMap<String, String>,
}

impl ActionPolicy {
    pub fn new(actions: HashMap<String, String>) -> Self {
        Self { actions }
    }

    pub fn lookup(&self, segment: &str) -> Option<&str> {
        self.actions.get(segment).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RfvConfig {
    /// The fixed calendar date Recency is measured against. Must be on or
    /// after the newest purchase date unless the anomaly policy says
    /// otherwise.
    pub reference_date: NaiveDate,

    #[serde(default)]
    pub recency_anomaly: RecencyAnomalyPolicy,

    pub actions: ActionPolicy,
}

impl Default for RecencyAnomalyPolicy {
    fn default() -> Self {
        RecencyAnomalyPolicy::Reject
    }
}

impl RfvConfig {
    /// Load from a JSON config file.
    /// In tests and as the runner fallback, use RfvConfig::baseline().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: RfvConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// The shipped defaults: the 2021-12-09 reference date and the four
    /// historically defined segment actions. Any of the 64 possible codes
    /// may be added via a config file.
    pub fn baseline() -> Self {
        let mut actions = HashMap::new();
        actions.insert(
            "AAA".to_string(),
            "Send discount coupons, ask for referrals, send free samples.".to_string(),
        );
        actions.insert(
            "DDD".to_string(),
            "Low value, low frequency customers; take no action.".to_string(),
        );
        actions.insert(
            "DAA".to_string(),
            "Lapsed big spenders; send win-back coupons.".to_string(),
        );
        actions.insert(
            "CAA".to_string(),
            "Important customers; send loyalty incentives.".to_string(),
        );

        Self {
            reference_date: NaiveDate::from_ymd_opt(2021, 12, 9).unwrap(),
            recency_anomaly: RecencyAnomalyPolicy::Reject,
            actions: ActionPolicy::new(actions),
        }
    }
}
