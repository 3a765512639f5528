//! Segment codes and marketing actions.
//!
//! The segment code is the three class letters in R, F, V order. Action
//! lookup is an exact, case-sensitive match against the configured policy;
//! an unmatched code means "no defined action", never an error.

use crate::{
    classify::{Class, ClassifiedCustomer},
    config::ActionPolicy,
    types::CustomerId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Concatenate class letters into the 3-character segment code.
pub fn segment_code(r: Class, f: Class, v: Class) -> String {
    format!("{}{}{}", r.as_char(), f.as_char(), v.as_char())
}

/// One output-table row: metrics, classes, segment code, and the matched
/// action (None when the policy defines nothing for the code).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentedCustomer {
    pub customer_id: CustomerId,
    pub recency_days: i64,
    pub frequency: u64,
    pub value: f64,
    pub r_class: Class,
    pub f_class: Class,
    pub v_class: Class,
    pub segment: String,
    pub action: Option<String>,
}

/// Attach segment codes and policy actions to classified rows.
pub fn apply_policy(
    classified: &[ClassifiedCustomer],
    policy: &ActionPolicy,
) -> Vec<SegmentedCustomer> {
    classified
        .iter()
        .map(|c| {
            let segment = segment_code(c.r_class, c.f_class, c.v_class);
            let action = policy.lookup(&segment).map(str::to_string);
            SegmentedCustomer {
                customer_id: c.customer_id.clone(),
                recency_days: c.recency_days,
                frequency: c.frequency,
                value: c.value,
                r_class: c.r_class,
                f_class: c.f_class,
                v_class: c.v_class,
                segment,
                action,
            }
        })
        .collect()
}

/// Customer count per segment code, sorted by code. Used by the runner's
/// distribution table.
pub fn segment_counts(rows: &[SegmentedCustomer]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts.entry(row.segment.clone()).or_insert(0) += 1;
    }
    counts
}
