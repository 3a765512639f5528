//! Quartile boundaries via linear-interpolation percentiles.
//!
//! RULE: boundaries are computed once over the complete metrics table and
//! never mutated afterwards. This is the pipeline's only hard barrier:
//! classification cannot start until every customer row exists.

use crate::{
    aggregate::CustomerMetrics,
    error::{RfvError, RfvResult},
};
use serde::{Deserialize, Serialize};

/// The 25th/50th/75th percentile boundaries for one metric.
/// With fewer than 4 distinct values, boundaries may coincide; the
/// classifier's inclusive-lower-band rule keeps that well defined.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct QuartileBoundaries {
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
}

impl QuartileBoundaries {
    pub fn compute(values: &[f64]) -> RfvResult<Self> {
        if values.is_empty() {
            return Err(RfvError::InsufficientData);
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        Ok(Self {
            q25: percentile_sorted(&sorted, 25.0),
            q50: percentile_sorted(&sorted, 50.0),
            q75: percentile_sorted(&sorted, 75.0),
        })
    }
}

/// Linear-interpolation percentile over ascending-sorted values.
/// For percentile p over n values: pos = p/100 × (n−1); a fractional
/// position interpolates between the two adjacent values.
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let pos = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = pos - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

/// Boundary sets for all three metrics, computed independently.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RfvQuartiles {
    pub recency: QuartileBoundaries,
    pub frequency: QuartileBoundaries,
    pub value: QuartileBoundaries,
}

impl RfvQuartiles {
    pub fn compute(metrics: &[CustomerMetrics]) -> RfvResult<Self> {
        if metrics.is_empty() {
            return Err(RfvError::InsufficientData);
        }

        let recency: Vec<f64> = metrics.iter().map(|m| m.recency_days as f64).collect();
        let frequency: Vec<f64> = metrics.iter().map(|m| m.frequency as f64).collect();
        let value: Vec<f64> = metrics.iter().map(|m| m.value).collect();

        Ok(Self {
            recency: QuartileBoundaries::compute(&recency)?,
            frequency: QuartileBoundaries::compute(&frequency)?,
            value: QuartileBoundaries::compute(&value)?,
        })
    }
}
