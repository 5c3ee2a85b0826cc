use thiserror::Error;

/// Errors that can occur while talking to a table store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Table '{table_name}' not found")]
    TableNotFound { table_name: String },
    #[error("Table '{table_name}' already exists")]
    AlreadyExists { table_name: String },
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Timeout waiting for table '{table_name}' to be deleted")]
    WaitTimeout { table_name: String },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
