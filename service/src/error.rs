use sea_orm::{DbErr, TransactionError};
use thiserror::Error;

/// Error taxonomy of the procedure surface. Errors propagate unmodified to
/// the caller; there is no local recovery or retry anywhere in the core.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl From<TransactionError<ServiceError>> for ServiceError {
    fn from(err: TransactionError<ServiceError>) -> Self {
        match err {
            TransactionError::Connection(e) => ServiceError::Db(e),
            TransactionError::Transaction(e) => e,
        }
    }
}
