use chrono::NaiveDate;
use serde_json::{Map, Value};

/// One result row: column name to scalar value, in the column order the
/// database produced.
pub type Row = Map<String, Value>;

/// A positional statement parameter. `None` binds SQL `NULL`.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(Option<i32>),
    Float(f64),
    Text(Option<String>),
    Date(Option<NaiveDate>),
}

/// Whether a statement yields a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rows,
    Command,
}

/// SQL text plus its positional parameters, ready for a [`QueryExecutor`].
///
/// [`QueryExecutor`]: super::ports::QueryExecutor
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlParam>,
    pub shape: Shape,
}

impl Statement {
    pub fn rows(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
            shape: Shape::Rows,
        }
    }

    pub fn command(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
            shape: Shape::Command,
        }
    }
}

/// First column of the first row, unless it is absent or `NULL`.
pub fn first_value(rows: &[Row]) -> Option<&Value> {
    rows.first()
        .and_then(|row| row.values().next())
        .filter(|v| !v.is_null())
}
