use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::domain::errors::QueryError;
use crate::domain::ports::QueryExecutor;
use crate::domain::row::{Row, Statement};

/// Executor double: records every statement and answers with a canned result.
pub struct RecordingExecutor {
    response: Result<Vec<Row>, QueryError>,
    statements: Mutex<Vec<Statement>>,
}

impl RecordingExecutor {
    pub fn returning(rows: Vec<Value>) -> Arc<Self> {
        let rows = rows
            .into_iter()
            .map(|v| match v {
                Value::Object(row) => row,
                other => panic!("rows must be JSON objects, got {other}"),
            })
            .collect();
        Arc::new(Self {
            response: Ok(rows),
            statements: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(error: QueryError) -> Arc<Self> {
        Arc::new(Self {
            response: Err(error),
            statements: Mutex::new(Vec::new()),
        })
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.statements.lock().expect("poisoned").clone()
    }
}

impl QueryExecutor for RecordingExecutor {
    fn execute(&self, statement: &Statement) -> Result<Vec<Row>, QueryError> {
        self.statements
            .lock()
            .expect("poisoned")
            .push(statement.clone());
        self.response.clone()
    }
}
