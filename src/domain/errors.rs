use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// Rejected before any statement reached the database.
    #[error("{0}")]
    Validation(String),

    /// Raised by the driver, the pool or a stored procedure.
    #[error("{message}")]
    Database {
        message: String,
        code: Option<String>,
        detail: Option<String>,
    },
}

impl QueryError {
    pub fn validation(message: impl Into<String>) -> Self {
        QueryError::Validation(message.into())
    }

    pub fn database(message: impl Into<String>) -> Self {
        QueryError::Database {
            message: message.into(),
            code: None,
            detail: None,
        }
    }
}
