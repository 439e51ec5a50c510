use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    RfcError(#[from] rehber_rfc::error::RfcError),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
