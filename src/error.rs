//! Error type shared by the loan loader, engines and report binary

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid decimal in {field}: {value:?}")]
    InvalidDecimal { field: &'static str, value: String },

    #[error("invalid {field}: {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("loan {0} not found")]
    LoanNotFound(u64),
}

pub type Result<T> = std::result::Result<T, LoanError>;
