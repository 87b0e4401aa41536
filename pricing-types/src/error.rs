//! Error types for the pricing service.

use currency_locale::CurrencyCode;

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid exchange rate: {0}")]
    InvalidRate(f64),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<currency_locale::UnknownCurrency> for DomainError {
    fn from(err: currency_locale::UnknownCurrency) -> Self {
        DomainError::UnknownCurrency(err.0)
    }
}

/// Rate store errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Entity not found")]
    NotFound,
}

/// Rate fetcher errors (external provider failures).
///
/// Every variant is recoverable: the service falls back to the cached rate
/// or to 1:1 parity and never surfaces these to the search caller.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Rate provider unavailable: {0}")]
    Unavailable(String),

    #[error("Rate provider returned malformed response: {0}")]
    MalformedResponse(String),

    #[error("Rate not available for {0} -> {1}")]
    RateNotAvailable(CurrencyCode, CurrencyCode),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Domain(DomainError::ValidationError(msg)) => AppError::BadRequest(msg),
            StoreError::Domain(e) => AppError::BadRequest(e.to_string()),
            StoreError::NotFound => AppError::NotFound("Resource not found".into()),
            StoreError::Database(e) => AppError::Internal(e),
            StoreError::Transaction(e) => AppError::Internal(e),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
