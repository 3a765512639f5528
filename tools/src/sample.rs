//! Deterministic sample purchase-log generator.
//!
//! RULE: nothing here calls a platform RNG — all randomness flows from the
//! seed, so the same seed always produces a byte-identical file. Amounts
//! are Pareto-sampled to skew the way real purchase logs do.

use anyhow::Result;
use chrono::NaiveDate;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use uuid::Uuid;

/// Purchases fall in the half year leading up to this date, which is one
/// day before the baseline reference date.
const WINDOW_END: (i32, u32, u32) = (2021, 12, 8);
const WINDOW_DAYS: u64 = 180;

const MAX_PURCHASES_PER_CUSTOMER: u64 = 8;

struct SampleRng {
    inner: Pcg64Mcg,
}

impl SampleRng {
    fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Sample from a simplified Pareto distribution.
    /// x_min: minimum value, alpha: shape parameter (higher = less skewed).
    fn pareto(&mut self, x_min: f64, alpha: f64) -> f64 {
        let u = self.next_f64().max(1e-10);
        x_min * u.powf(-1.0 / alpha)
    }
}

/// Write a synthetic purchase log with the required columns.
pub fn write_sample_log(path: &str, customers: u64, seed: u64) -> Result<()> {
    let (y, m, d) = WINDOW_END;
    let window_end = NaiveDate::from_ymd_opt(y, m, d).unwrap();
    let mut rng = SampleRng::new(seed);

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| anyhow::anyhow!("Cannot write {path}: {e}"))?;
    writer.write_record(["customer_id", "purchase_date", "purchase_id", "amount"])?;

    let mut rows = 0u64;
    for c in 0..customers {
        let customer_id = format!("C{c:04}");
        let purchase_count = 1 + rng.next_u64_below(MAX_PURCHASES_PER_CUSTOMER);

        for _ in 0..purchase_count {
            let offset = rng.next_u64_below(WINDOW_DAYS) as i64;
            let purchase_date = window_end - chrono::Duration::days(offset);

            let purchase_id = Uuid::from_u64_pair(rng.next_u64(), rng.next_u64());

            let raw = rng.pareto(15.0, 1.6).min(2000.0);
            let amount = (raw * 100.0).round() / 100.0;

            let record = [
                customer_id.clone(),
                purchase_date.to_string(),
                purchase_id.to_string(),
                format!("{amount:.2}"),
            ];
            writer.write_record(&record)?;
            rows += 1;
        }
    }

    writer.flush()?;
    log::info!("sample: {rows} purchase rows for {customers} customers (seed {seed})");
    Ok(())
}
