use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{Date, Double, Integer, Json, Nullable, Text};
use serde_json::Value;

use crate::db::DbPool;
use crate::domain::errors::QueryError;
use crate::domain::ports::QueryExecutor;
use crate::domain::row::{Row, Shape, SqlParam, Statement};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for QueryError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::DatabaseError(kind, info) => QueryError::Database {
                message: info.message().to_string(),
                code: Some(format!("{kind:?}")),
                detail: info.details().map(str::to_string),
            },
            other => QueryError::database(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for QueryError {
    fn from(e: r2d2::Error) -> Self {
        QueryError::Database {
            message: e.to_string(),
            code: Some("CONNECTION".to_string()),
            detail: None,
        }
    }
}

// ── Executor ─────────────────────────────────────────────────────────────────

#[derive(QueryableByName)]
struct JsonRows {
    #[diesel(sql_type = Json)]
    result_rows: Value,
}

/// Executes statements on pooled `PgConnection`s.
///
/// Row-returning statements are wrapped in `json_agg`, so PostgreSQL hands
/// back the whole result set as one JSON array with column order intact.
pub struct DieselQueryExecutor {
    pool: DbPool,
}

impl DieselQueryExecutor {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl QueryExecutor for DieselQueryExecutor {
    fn execute(&self, statement: &Statement) -> Result<Vec<Row>, QueryError> {
        log::debug!(
            "Executing query: {} with params: {:?}",
            statement.sql,
            statement.params
        );
        let mut conn = self.pool.get()?;

        let result = match statement.shape {
            Shape::Rows => {
                let sql = format!(
                    "SELECT COALESCE(json_agg(t), '[]'::json) AS result_rows FROM ({}) AS t",
                    statement.sql
                );
                bind_params(diesel::sql_query(sql).into_boxed(), &statement.params)
                    .get_result::<JsonRows>(&mut conn)
                    .map_err(QueryError::from)
                    .and_then(|loaded| into_rows(loaded.result_rows))
            }
            Shape::Command => bind_params(
                diesel::sql_query(statement.sql.as_str()).into_boxed(),
                &statement.params,
            )
            .execute(&mut conn)
            .map(|_| Vec::new())
            .map_err(QueryError::from),
        };

        match &result {
            Ok(rows) => log::debug!("Query succeeded, rows returned: {}", rows.len()),
            Err(e) => log::error!("Query failed: {:?}", e),
        }
        result
    }
}

fn bind_params(
    mut query: BoxedSqlQuery<'static, Pg, SqlQuery>,
    params: &[SqlParam],
) -> BoxedSqlQuery<'static, Pg, SqlQuery> {
    for param in params {
        query = match param {
            SqlParam::Int(v) => query.bind::<Nullable<Integer>, _>(*v),
            SqlParam::Float(v) => query.bind::<Double, _>(*v),
            SqlParam::Text(v) => query.bind::<Nullable<Text>, _>(v.clone()),
            SqlParam::Date(v) => query.bind::<Nullable<Date>, _>(*v),
        };
    }
    query
}

fn into_rows(value: Value) -> Result<Vec<Row>, QueryError> {
    let Value::Array(items) = value else {
        return Err(QueryError::database("Result set was not a JSON array"));
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(row) => Ok(row),
            other => Err(QueryError::database(format!(
                "Result row was not a JSON object: {other}"
            ))),
        })
        .collect()
}
