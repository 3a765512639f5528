//! Quartile-band classification — one metric value to an ordinal class.

use crate::{
    aggregate::CustomerMetrics,
    quartiles::{QuartileBoundaries, RfvQuartiles},
    types::CustomerId,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal class letter. 'A' is always the best band for its metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Class {
    A,
    B,
    C,
    D,
}

impl Class {
    pub fn as_char(self) -> char {
        match self {
            Class::A => 'A',
            Class::B => 'B',
            Class::C => 'C',
            Class::D => 'D',
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Which way a metric scores: Ascending means lower is better (Recency),
/// Descending means higher is better (Frequency, Value).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Map one metric value to its class letter.
///
/// Bands are inclusive on the lower side: a value exactly equal to a
/// boundary falls into the earlier band. This holds even when sparse data
/// makes boundaries coincide, so every finite value gets exactly one class.
pub fn grade(value: f64, bounds: &QuartileBoundaries, direction: Direction) -> Class {
    match direction {
        Direction::Ascending => {
            if value <= bounds.q25 {
                Class::A
            } else if value <= bounds.q50 {
                Class::B
            } else if value <= bounds.q75 {
                Class::C
            } else {
                Class::D
            }
        }
        Direction::Descending => {
            if value <= bounds.q25 {
                Class::D
            } else if value <= bounds.q50 {
                Class::C
            } else if value <= bounds.q75 {
                Class::B
            } else {
                Class::A
            }
        }
    }
}

/// A metrics row with its three class letters attached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifiedCustomer {
    pub customer_id: CustomerId,
    pub recency_days: i64,
    pub frequency: u64,
    pub value: f64,
    pub r_class: Class,
    pub f_class: Class,
    pub v_class: Class,
}

/// Classify one customer against fixed boundaries.
pub fn classify_one(metrics: &CustomerMetrics, quartiles: &RfvQuartiles) -> ClassifiedCustomer {
    ClassifiedCustomer {
        customer_id: metrics.customer_id.clone(),
        recency_days: metrics.recency_days,
        frequency: metrics.frequency,
        value: metrics.value,
        r_class: grade(metrics.recency_days as f64, &quartiles.recency, Direction::Ascending),
        f_class: grade(metrics.frequency as f64, &quartiles.frequency, Direction::Descending),
        v_class: grade(metrics.value, &quartiles.value, Direction::Descending),
    }
}

/// Classify every customer. Customers are independent once boundaries are
/// fixed; order in, order out.
pub fn classify(metrics: &[CustomerMetrics], quartiles: &RfvQuartiles) -> Vec<ClassifiedCustomer> {
    metrics.iter().map(|m| classify_one(m, quartiles)).collect()
}
