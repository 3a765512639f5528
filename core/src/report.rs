//! CSV report writer for the classified table.
//!
//! Column order matches SegmentedCustomer's fields: customer_id,
//! recency_days, frequency, value, r_class, f_class, v_class, segment,
//! action. An undefined action serializes as an empty cell.

use crate::{error::RfvResult, segment::SegmentedCustomer};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn write_report<W: Write>(rows: &[SegmentedCustomer], writer: W) -> RfvResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_report_to_path<P: AsRef<Path>>(
    rows: &[SegmentedCustomer],
    path: P,
) -> RfvResult<()> {
    let file = File::create(path.as_ref())?;
    write_report(rows, file)
}
