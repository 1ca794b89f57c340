use thiserror::Error;

/// Result type for message store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error types for message store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Invalid configuration or unreachable database
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Connection pool issues
    #[error("Pool error: {0}")]
    PoolError(String),

    /// SQL errors, constraint violations
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A stored row could not be turned back into a message
    #[error("Decode error: {0}")]
    DecodeError(String),
}

/// Convert tokio-postgres errors to store errors
impl From<tokio_postgres::Error> for StoreError {
    fn from(err: tokio_postgres::Error) -> Self {
        if let Some(db_error) = err.as_db_error() {
            return StoreError::DatabaseError(format!(
                "{}: {}",
                db_error.code().code(),
                db_error.message()
            ));
        }

        // For non-database errors (closed connection, I/O), keep the debug form
        StoreError::DatabaseError(format!("{:?}", err))
    }
}

impl From<deadpool_postgres::PoolError> for StoreError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        StoreError::PoolError(err.to_string())
    }
}

impl From<deadpool_postgres::BuildError> for StoreError {
    fn from(err: deadpool_postgres::BuildError) -> Self {
        StoreError::ConnectionError(err.to_string())
    }
}
