use thiserror::Error;

/// Errors surfaced by the ledger, the assembler and the reports
#[derive(Debug, Error)]
pub enum FakturaError {
    #[error("invoice {0} not found")]
    InvoiceNotFound(i64),

    /// (work date, job id) already stored. Batch ingestion skips these.
    #[error("invoice item {job_id} dated {work_date} already exists")]
    DuplicateItem { work_date: i64, job_id: String },

    #[error("the key `{field}` is missing from: {item}")]
    MissingField { field: &'static str, item: String },

    #[error("invalid date `{input}`, expected dd.mm.yyyy")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("timestamp {0} is out of range")]
    TimestampOutOfRange(i64),

    #[error(transparent)]
    Storage(#[from] sqlx::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ::config::ConfigError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl FakturaError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, FakturaError::DuplicateItem { .. })
    }
}

pub type Result<T> = std::result::Result<T, FakturaError>;
