//! rfv-runner: headless RFV segmentation runner.
//!
//! Usage:
//!   rfv-runner --input purchases.csv --out report.csv
//!   rfv-runner --input purchases.csv --config rfv_config.json
//!   rfv-runner --gen-sample purchases.csv --customers 200 --seed 42

mod sample;

use anyhow::Result;
use rfv_core::{
    config::RfvConfig,
    ingest,
    pipeline::{self, RfvRun},
    report,
    segment::segment_counts,
};
use std::env;

const TABLE_HEAD_ROWS: usize = 10;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if let Some(path) = arg_value(&args, "--gen-sample") {
        let customers = parse_arg(&args, "--customers", 200u64);
        let seed = parse_arg(&args, "--seed", 42u64);
        sample::write_sample_log(path, customers, seed)?;
        println!("Sample purchase log written to {path} ({customers} customers, seed {seed})");
        return Ok(());
    }

    let input = arg_value(&args, "--input").ok_or_else(|| {
        anyhow::anyhow!(
            "Usage: rfv-runner --input purchases.csv [--config rfv_config.json] [--out report.csv]\n\
             or:    rfv-runner --gen-sample purchases.csv [--customers N] [--seed S]"
        )
    })?;

    let config = match arg_value(&args, "--config") {
        Some(path) => RfvConfig::load(path)?,
        None => RfvConfig::baseline(),
    };

    println!("rfv-runner");
    println!("  input:          {input}");
    println!("  reference date: {}", config.reference_date);
    println!("  anomaly policy: {:?}", config.recency_anomaly);
    println!("  policy entries: {}", config.actions.len());
    println!();

    let transactions = ingest::read_transactions_from_path(input)?;
    if let Some(summary) = ingest::SourceSummary::of(&transactions) {
        println!("=== SOURCE ===");
        println!("  rows:              {}", summary.rows);
        println!("  earliest purchase: {}", summary.min_purchase_date);
        println!("  latest purchase:   {}", summary.max_purchase_date);
        println!();
    }

    let run = pipeline::run_pipeline(&transactions, &config)?;
    print_summary(&run);

    if let Some(out) = arg_value(&args, "--out") {
        report::write_report_to_path(&run.customers, out)?;
        println!();
        println!("Report written to {out}");
    }

    Ok(())
}

fn print_summary(run: &RfvRun) {
    println!("=== QUARTILE BOUNDARIES ===");
    println!("  metric         q25        q50        q75");
    let q = &run.quartiles;
    println!("  recency    {:>8.2} {:>10.2} {:>10.2}", q.recency.q25, q.recency.q50, q.recency.q75);
    println!("  frequency  {:>8.2} {:>10.2} {:>10.2}", q.frequency.q25, q.frequency.q50, q.frequency.q75);
    println!("  value      {:>8.2} {:>10.2} {:>10.2}", q.value.q25, q.value.q50, q.value.q75);

    println!();
    println!("=== SEGMENT DISTRIBUTION ===");
    for (code, count) in segment_counts(&run.customers) {
        println!("  {code}: {count}");
    }

    println!();
    println!("=== TABLE HEAD ===");
    println!("  customer_id      R     F        V  segment  action");
    for row in run.customers.iter().take(TABLE_HEAD_ROWS) {
        println!(
            "  {:<12} {:>5} {:>5} {:>8.2}  {}      {}",
            row.customer_id,
            row.recency_days,
            row.frequency,
            row.value,
            row.segment,
            row.action.as_deref().unwrap_or("-"),
        );
    }
    if run.customers.len() > TABLE_HEAD_ROWS {
        println!("  ... {} more rows", run.customers.len() - TABLE_HEAD_ROWS);
    }
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
