//! rfv-core — Recency/Frequency/Value customer segmentation.
//!
//! Ingests a purchase log, reduces it to per-customer RFV metrics, buckets
//! each metric into quartile bands, and maps the resulting 3-letter segment
//! codes to configured marketing actions. The pipeline is a fixed-order
//! composition of pure stages; see pipeline.rs for the execution order.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod quartiles;
pub mod report;
pub mod segment;
pub mod types;
