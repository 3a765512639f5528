use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RfvError {
    #[error("Input schema error: required column '{column}' is missing")]
    InputSchema { column: &'static str },

    #[error("Date parse error: '{value}' in record {record} is not a YYYY-MM-DD date")]
    DateParse { value: String, record: u64 },

    #[error("Insufficient data: no customer rows to compute quartiles over")]
    InsufficientData,

    #[error(
        "Purchase after reference date: customer '{customer_id}' last bought on \
         {purchase_date}, reference date is {reference_date}"
    )]
    FutureDate {
        customer_id: String,
        purchase_date: NaiveDate,
        reference_date: NaiveDate,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type RfvResult<T> = Result<T, RfvError>;
