use chrono::NaiveDate;
use rfv_core::{
    config::{RecencyAnomalyPolicy, RfvConfig},
    ingest::Transaction,
    pipeline::run_pipeline,
    report::write_report,
};
use std::io::Write;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn txn(customer: &str, purchase_date: NaiveDate, amount: f64) -> Transaction {
    Transaction {
        customer_id: customer.to_string(),
        purchase_date,
        purchase_id: format!("p-{customer}-{purchase_date}"),
        amount,
    }
}

/// Four customers spread across the quartile bands under the baseline
/// config (reference date 2021-12-09):
///   c-alpha:   R=1,  F=5, V=2000 -> AAA
///   c-bravo:   R=10, F=3, V=600  -> BBB
///   c-charlie: R=20, F=2, V=200  -> CCC
///   c-delta:   R=30, F=1, V=50   -> DDD
fn four_band_log() -> Vec<Transaction> {
    let mut transactions = Vec::new();
    for _ in 0..5 {
        transactions.push(txn("c-alpha", date(2021, 12, 8), 400.0));
    }
    for _ in 0..3 {
        transactions.push(txn("c-bravo", date(2021, 11, 29), 200.0));
    }
    for _ in 0..2 {
        transactions.push(txn("c-charlie", date(2021, 11, 19), 100.0));
    }
    transactions.push(txn("c-delta", date(2021, 11, 9), 50.0));
    transactions
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Full run: quartiles interpolate over the aggregated table, every band
/// is hit, and the policy attaches actions for defined codes only.
#[test]
fn end_to_end_four_customers() {
    let config = RfvConfig::baseline();
    let run = run_pipeline(&four_band_log(), &config).unwrap();

    // Recencies [1, 10, 20, 30] interpolate to q25 = 7.75.
    assert!((run.quartiles.recency.q25 - 7.75).abs() < 1e-9);

    let segments: Vec<(&str, &str)> = run
        .customers
        .iter()
        .map(|c| (c.customer_id.as_str(), c.segment.as_str()))
        .collect();
    assert_eq!(
        segments,
        [
            ("c-alpha", "AAA"),
            ("c-bravo", "BBB"),
            ("c-charlie", "CCC"),
            ("c-delta", "DDD"),
        ]
    );

    // Baseline policy defines AAA and DDD, not BBB or CCC.
    assert!(run.customers[0].action.is_some());
    assert!(run.customers[1].action.is_none());
    assert!(run.customers[2].action.is_none());
    assert!(run.customers[3].action.is_some());
}

/// Source row order never changes the output table.
#[test]
fn input_order_does_not_matter() {
    let config = RfvConfig::baseline();
    let log = four_band_log();
    let mut reversed = log.clone();
    reversed.reverse();

    let forward = run_pipeline(&log, &config).unwrap();
    let backward = run_pipeline(&reversed, &config).unwrap();

    assert_eq!(forward.customers, backward.customers);
}

/// The worked single-customer example survives the whole pipeline:
/// R=4, F=2, V=150, with all boundaries coinciding on one row.
#[test]
fn single_customer_end_to_end() {
    let transactions = vec![
        txn("C1", date(2021, 12, 1), 100.0),
        txn("C1", date(2021, 12, 5), 50.0),
    ];

    let run = run_pipeline(&transactions, &RfvConfig::baseline()).unwrap();

    assert_eq!(run.customers.len(), 1);
    let row = &run.customers[0];
    assert_eq!(row.recency_days, 4);
    assert_eq!(row.frequency, 2);
    assert!((row.value - 150.0).abs() < 1e-9);
    // Inclusive lower bands: the sole value sits on every boundary, so
    // Recency takes 'A' and Frequency/Value take 'D'.
    assert_eq!(row.segment, "ADD");
}

/// The CSV report carries a header plus one line per customer, with an
/// empty action cell for undefined codes.
#[test]
fn report_has_header_and_rows() {
    let run = run_pipeline(&four_band_log(), &RfvConfig::baseline()).unwrap();

    let mut buffer = Vec::new();
    write_report(&run.customers, &mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), run.customers.len() + 1);
    assert_eq!(
        lines[0],
        "customer_id,recency_days,frequency,value,r_class,f_class,v_class,segment,action"
    );
    assert!(lines[1].starts_with("c-alpha,1,5,2000"));
    // c-bravo's BBB has no configured action: the row ends on an empty cell.
    assert!(lines[2].ends_with("BBB,"));
}

/// A config file round-trips through load(), including a defaulted
/// anomaly policy when the key is absent.
#[test]
fn config_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rfv_config.json");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"{{
  "reference_date": "2021-12-09",
  "actions": {{ "AAA": "Send coupons." }}
}}"#
    )
    .unwrap();

    let config = RfvConfig::load(path.to_str().unwrap()).unwrap();

    assert_eq!(config.reference_date, date(2021, 12, 9));
    assert_eq!(config.recency_anomaly, RecencyAnomalyPolicy::Reject);
    assert_eq!(config.actions.lookup("AAA"), Some("Send coupons."));
    assert_eq!(config.actions.lookup("ZZZ"), None);
}
