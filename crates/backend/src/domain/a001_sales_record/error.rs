use thiserror::Error;

/// Period text that could not be turned into a date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed period {value:?}: {reason}")]
pub struct MalformedPeriod {
    pub value: String,
    pub reason: &'static str,
}

/// Errors raised while loading the sales table. All of them abort the load.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("required column '{column}' is missing")]
    Schema { column: String },

    /// `row` is the 1-based data row, header excluded
    #[error("row {row}: {source}")]
    MalformedDate {
        row: usize,
        #[source]
        source: MalformedPeriod,
    },

    #[error("row {row}: column '{column}' has non-numeric value {value:?}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("sales table contains no records")]
    EmptyTable,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
