use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestDbError {
    #[error("Store error: {0}")]
    Store(#[from] mongodb::error::Error),

    #[error("Test database not yet initialized")]
    NotInitialized,

    #[error("Test database connection already closed")]
    Closed,

    #[error("No database name in connection string: {0}")]
    NoDatabaseName(String),
}

pub type Result<T> = std::result::Result<T, TestDbError>;
