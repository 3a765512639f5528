use chrono::NaiveDate;
use rfv_core::{
    error::RfvError,
    ingest::{read_transactions, read_transactions_from_path, SourceSummary},
};
use std::io::Write;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const WELL_FORMED: &str = "\
customer_id,purchase_date,purchase_id,amount
c-1,2021-12-01,p-1,100.0
c-1,2021-12-05,p-2,50.0
c-2,2021-11-20,p-3,19.99
";

// ── Tests ────────────────────────────────────────────────────────────────────

/// A well-formed source parses into typed rows, one per CSV record.
#[test]
fn reads_well_formed_source() {
    let transactions = read_transactions(WELL_FORMED.as_bytes()).unwrap();

    assert_eq!(transactions.len(), 3);
    assert_eq!(transactions[0].customer_id, "c-1");
    assert_eq!(transactions[0].purchase_date, date(2021, 12, 1));
    assert_eq!(transactions[0].purchase_id, "p-1");
    assert!((transactions[2].amount - 19.99).abs() < 1e-9);
}

/// Extra columns are ignored; only the required four matter.
#[test]
fn extra_columns_are_ignored() {
    let source = "\
customer_id,store,purchase_date,purchase_id,amount
c-1,north,2021-12-01,p-1,100.0
";
    let transactions = read_transactions(source.as_bytes()).unwrap();

    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].customer_id, "c-1");
}

/// A missing required column fails before any row is read, naming the
/// column.
#[test]
fn missing_column_is_schema_error() {
    let source = "\
customer_id,purchase_date,amount
c-1,2021-12-01,100.0
";
    let err = read_transactions(source.as_bytes()).unwrap_err();

    match err {
        RfvError::InputSchema { column } => assert_eq!(column, "purchase_id"),
        other => panic!("expected InputSchema, got {other:?}"),
    }
}

/// An unparseable date names the offending value and its record.
#[test]
fn bad_date_is_date_parse_error() {
    let source = "\
customer_id,purchase_date,purchase_id,amount
c-1,2021-12-01,p-1,100.0
c-1,12/05/2021,p-2,50.0
";
    let err = read_transactions(source.as_bytes()).unwrap_err();

    match err {
        RfvError::DateParse { value, record } => {
            assert_eq!(value, "12/05/2021");
            assert_eq!(record, 3);
        }
        other => panic!("expected DateParse, got {other:?}"),
    }
}

/// A missing amount counts as zero; the row still exists (and so still
/// counts toward Frequency downstream).
#[test]
fn missing_amount_counts_as_zero() {
    let source = "\
customer_id,purchase_date,purchase_id,amount
c-1,2021-12-01,p-1,
c-1,2021-12-05,p-2,50.0
";
    let transactions = read_transactions(source.as_bytes()).unwrap();

    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].amount, 0.0);
    assert!((transactions[1].amount - 50.0).abs() < 1e-9);
}

/// An unparseable amount falls back to zero the same way.
#[test]
fn garbage_amount_counts_as_zero() {
    let source = "\
customer_id,purchase_date,purchase_id,amount
c-1,2021-12-01,p-1,n/a
";
    let transactions = read_transactions(source.as_bytes()).unwrap();

    assert_eq!(transactions[0].amount, 0.0);
}

/// The summary reports the row count and purchase-date span; an empty
/// source has no summary.
#[test]
fn summary_reports_span() {
    let transactions = read_transactions(WELL_FORMED.as_bytes()).unwrap();

    let summary = SourceSummary::of(&transactions).unwrap();
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.min_purchase_date, date(2021, 11, 20));
    assert_eq!(summary.max_purchase_date, date(2021, 12, 5));

    assert!(SourceSummary::of(&[]).is_none());
}

/// The file-path wrapper reads the same rows as a reader.
#[test]
fn reads_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("purchases.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{WELL_FORMED}").unwrap();
    drop(file);

    let transactions = read_transactions_from_path(&path).unwrap();

    assert_eq!(transactions.len(), 3);
    assert_eq!(transactions[1].purchase_id, "p-2");
}
