use super::errors::QueryError;
use super::row::{Row, Statement};

/// Runs one statement against the configured database.
///
/// Implementations are blocking; callers on an async runtime must move the
/// call onto a blocking thread.
pub trait QueryExecutor: Send + Sync + 'static {
    fn execute(&self, statement: &Statement) -> Result<Vec<Row>, QueryError>;
}
