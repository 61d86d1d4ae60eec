use chrono::NaiveDate;
use thiserror::Error;

/// Rejections produced when validating a new ledger entry. Surfacing them to
/// the user is the presentation layer's job; the ledger stays untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("amount must be a finite number")]
    AmountNotFinite,
    #[error("amount must not be zero")]
    ZeroAmount,
    #[error("date {0} is in the future")]
    FutureDate(NaiveDate),
}

/// Failures raised by a persistence backend. None of these are fatal to the
/// ledger: reads fail open to defaults and writes are logged and dropped.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Http(err.to_string())
    }
}
