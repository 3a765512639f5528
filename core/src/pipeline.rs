//! The RFV pipeline — fixed-order stage composition.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Aggregate — purchase rows to per-customer metrics
//!   2. Quartiles — boundary computation (hard barrier: needs every row)
//!   3. Classify  — per-customer class letters
//!   4. Segment   — code concatenation + action lookup
//!
//! RULES:
//!   - Every stage is a pure function of its input and the run config.
//!   - Boundaries are computed once and never mutated afterwards.
//!   - Customers are independent after the quartile barrier; processing
//!     order never affects results.

use crate::{
    aggregate::aggregate,
    classify::classify,
    config::RfvConfig,
    error::RfvResult,
    ingest::Transaction,
    quartiles::RfvQuartiles,
    segment::{apply_policy, segment_counts, SegmentedCustomer},
};

/// Everything one run produces: the boundary sets actually used and the
/// final classified table, ordered by customer id.
#[derive(Debug, Clone)]
pub struct RfvRun {
    pub quartiles: RfvQuartiles,
    pub customers: Vec<SegmentedCustomer>,
}

/// Run the full pipeline over a typed purchase log.
///
/// Fails fast on the first diagnostic error; there is no partial-result
/// mode. Retries are pointless — the computation is pure.
pub fn run_pipeline(transactions: &[Transaction], config: &RfvConfig) -> RfvResult<RfvRun> {
    let metrics = aggregate(transactions, config)?;
    log::info!(
        "aggregate: {} purchase rows -> {} customers",
        transactions.len(),
        metrics.len()
    );

    let quartiles = RfvQuartiles::compute(&metrics)?;
    log::info!(
        "quartiles: recency [{:.2} {:.2} {:.2}] frequency [{:.2} {:.2} {:.2}] value [{:.2} {:.2} {:.2}]",
        quartiles.recency.q25,
        quartiles.recency.q50,
        quartiles.recency.q75,
        quartiles.frequency.q25,
        quartiles.frequency.q50,
        quartiles.frequency.q75,
        quartiles.value.q25,
        quartiles.value.q50,
        quartiles.value.q75,
    );

    let classified = classify(&metrics, &quartiles);
    let customers = apply_policy(&classified, &config.actions);

    let with_action = customers.iter().filter(|c| c.action.is_some()).count();
    log::info!(
        "segment: {} customers across {} codes, {} with a defined action",
        customers.len(),
        segment_counts(&customers).len(),
        with_action,
    );

    Ok(RfvRun { quartiles, customers })
}
