//! # Store Errors

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the query layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection, I/O or query failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A write violated a storage constraint
    #[error("Rejected by storage constraint: {0}")]
    Rejected(String),
}

impl StoreError {
    /// Classify a failed write. Constraint violations are caused by the
    /// submitted values, everything else is a storage failure.
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) if is_constraint_violation(db_err.kind()) => {
                StoreError::Rejected(db_err.message().to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

fn is_constraint_violation(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation
    )
}
