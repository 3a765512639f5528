//! Metric aggregation — raw purchase rows down to one RFV row per customer.
//!
//! This stage:
//!   1. Groups purchase rows by customer identifier
//!   2. Takes the most recent purchase date per customer
//!   3. Counts rows (Frequency) and sums amounts (Value)
//!   4. Converts the last purchase date to whole days of Recency
//!
//! Pure function of its inputs. A customer with zero purchases never
//! appears — such a row cannot be derived from purchase data.

use crate::{
    config::{RecencyAnomalyPolicy, RfvConfig},
    error::{RfvError, RfvResult},
    ingest::Transaction,
    types::CustomerId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row per distinct customer in the input. Exactly one, always.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerMetrics {
    pub customer_id: CustomerId,
    /// Whole days between the reference date and the customer's newest
    /// purchase. Negative only under RecencyAnomalyPolicy::AllowNegative.
    pub recency_days: i64,
    pub frequency: u64,
    pub value: f64,
}

struct Partial {
    last_purchase: NaiveDate,
    frequency: u64,
    value: f64,
}

/// Reduce the purchase log to per-customer metrics.
///
/// Output rows are ordered by customer id, so repeated runs over the same
/// input produce identical tables regardless of source row order.
pub fn aggregate(
    transactions: &[Transaction],
    config: &RfvConfig,
) -> RfvResult<Vec<CustomerMetrics>> {
    if transactions.is_empty() {
        return Err(RfvError::InsufficientData);
    }

    let mut partials: BTreeMap<&str, Partial> = BTreeMap::new();
    for txn in transactions {
        let entry = partials
            .entry(txn.customer_id.as_str())
            .or_insert_with(|| Partial {
                last_purchase: txn.purchase_date,
                frequency: 0,
                value: 0.0,
            });
        entry.last_purchase = entry.last_purchase.max(txn.purchase_date);
        entry.frequency += 1;
        entry.value += txn.amount;
    }

    let mut rows = Vec::with_capacity(partials.len());
    for (customer_id, partial) in partials {
        let raw_recency = config
            .reference_date
            .signed_duration_since(partial.last_purchase)
            .num_days();

        let recency_days = if raw_recency < 0 {
            match config.recency_anomaly {
                RecencyAnomalyPolicy::Reject => {
                    return Err(RfvError::FutureDate {
                        customer_id: customer_id.to_string(),
                        purchase_date: partial.last_purchase,
                        reference_date: config.reference_date,
                    });
                }
                RecencyAnomalyPolicy::ClampToZero => 0,
                RecencyAnomalyPolicy::AllowNegative => raw_recency,
            }
        } else {
            raw_recency
        };

        rows.push(CustomerMetrics {
            customer_id: customer_id.to_string(),
            recency_days,
            frequency: partial.frequency,
            value: partial.value,
        });
    }

    log::debug!(
        "aggregate: {} purchase rows -> {} customers",
        transactions.len(),
        rows.len()
    );
    Ok(rows)
}
