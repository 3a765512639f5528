//! Purchase-log ingestion.
//!
//! RULE: Only ingest.rs touches the raw delimited source.
//! Pipeline stages consume typed `Transaction` rows — they never see CSV.
//!
//! Amount policy: a missing or unparseable amount is counted as 0.0 and
//! logged at warn level; the row still counts toward Frequency.

use crate::{
    error::{RfvError, RfvResult},
    types::{CustomerId, PurchaseId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column names the source must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 4] =
    ["customer_id", "purchase_date", "purchase_id", "amount"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One purchase event, as handed to the pipeline. Never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub customer_id: CustomerId,
    pub purchase_date: NaiveDate,
    pub purchase_id: PurchaseId,
    pub amount: f64,
}

/// The raw CSV shape. Dates stay as text here so parse failures can name
/// the offending value and record; amounts go through the lenient policy.
#[derive(Debug, Deserialize)]
struct RawRecord {
    customer_id: String,
    purchase_date: String,
    purchase_id: String,
    #[serde(deserialize_with = "lenient_amount")]
    amount: Option<f64>,
}

/// Empty or non-numeric amounts become None rather than a hard error;
/// the caller applies the documented counts-as-zero policy.
fn lenient_amount<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(de)?;
    Ok(raw.and_then(|s| s.trim().parse::<f64>().ok()))
}

/// Parse a purchase log into typed transactions.
///
/// Checks the header row for every required column before reading any
/// data, so a malformed source fails with the missing column's name
/// rather than a row-level deserialization error.
pub fn read_transactions<R: Read>(reader: R) -> RfvResult<Vec<Transaction>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(RfvError::InputSchema { column });
        }
    }

    let mut transactions = Vec::new();
    for (idx, result) in csv_reader.deserialize::<RawRecord>().enumerate() {
        // 1-based file line, counting the header row.
        let record = idx as u64 + 2;
        let raw = result?;

        let purchase_date = NaiveDate::parse_from_str(&raw.purchase_date, DATE_FORMAT)
            .map_err(|_| RfvError::DateParse {
                value: raw.purchase_date.clone(),
                record,
            })?;

        let amount = match raw.amount {
            Some(a) => a,
            None => {
                log::warn!("record {record}: missing or unparseable amount, counted as 0.0");
                0.0
            }
        };

        transactions.push(Transaction {
            customer_id: raw.customer_id,
            purchase_date,
            purchase_id: raw.purchase_id,
            amount,
        });
    }

    log::debug!("ingest: {} purchase rows read", transactions.len());
    Ok(transactions)
}

/// Convenience wrapper for file sources.
pub fn read_transactions_from_path<P: AsRef<Path>>(path: P) -> RfvResult<Vec<Transaction>> {
    let file = File::open(path.as_ref())?;
    read_transactions(file)
}

/// Shape of the source before aggregation: row count and purchase-date
/// span. Printed by the runner ahead of the pipeline output.
#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub rows: u64,
    pub min_purchase_date: NaiveDate,
    pub max_purchase_date: NaiveDate,
}

impl SourceSummary {
    /// None when the source holds no rows.
    pub fn of(transactions: &[Transaction]) -> Option<Self> {
        let first = transactions.first()?;
        let mut min = first.purchase_date;
        let mut max = first.purchase_date;
        for txn in transactions {
            min = min.min(txn.purchase_date);
            max = max.max(txn.purchase_date);
        }
        Some(Self {
            rows: transactions.len() as u64,
            min_purchase_date: min,
            max_purchase_date: max,
        })
    }
}
