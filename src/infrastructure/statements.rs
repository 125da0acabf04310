//! SQL text and positional parameters for every endpoint.
//!
//! The database routines are external; only their names, parameter order and
//! result shape are known here.

use crate::domain::requests::{LowStockFilter, NewOrderItemRequest, NewOrderRequest};
use crate::domain::row::{SqlParam, Statement};

pub const OBJECT_ROW_LIMIT: usize = 100;

pub const ORDER_HISTORY_FUNCTION: &str = "fn_get_customer_order_history";
pub const LOW_STOCK_FUNCTION: &str = "sp_get_low_stock_products";
pub const CREATE_ORDER_FUNCTION: &str = "sp_create_new_order";
pub const ADD_ITEM_PROCEDURE: &str = "sp_add_product_to_order";

/// Schema and catalog the catalog endpoints are restricted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogScope {
    pub schema: String,
    /// `None` restricts to the connected database.
    pub catalog: Option<String>,
}

impl Default for CatalogScope {
    fn default() -> Self {
        Self {
            schema: "public".to_string(),
            catalog: None,
        }
    }
}

impl CatalogScope {
    fn params(&self) -> Vec<SqlParam> {
        vec![
            SqlParam::Text(Some(self.schema.clone())),
            SqlParam::Text(self.catalog.clone()),
        ]
    }
}

pub fn list_tables(scope: &CatalogScope) -> Statement {
    Statement::rows(
        "SELECT table_name FROM information_schema.tables \
         WHERE table_type = 'BASE TABLE' AND table_schema = $1 \
         AND table_catalog = COALESCE($2, current_database()) \
         ORDER BY table_name",
        scope.params(),
    )
}

pub fn list_views(scope: &CatalogScope) -> Statement {
    Statement::rows(
        "SELECT table_name FROM information_schema.views \
         WHERE table_schema = $1 \
         AND table_catalog = COALESCE($2, current_database()) \
         ORDER BY table_name",
        scope.params(),
    )
}

/// `object_name` must already have passed
/// [`validate_object_name`](crate::domain::requests::validate_object_name).
pub fn object_rows(scope: &CatalogScope, object_name: &str) -> Statement {
    Statement::rows(
        format!(
            "SELECT * FROM {}.{} LIMIT {}",
            quote_identifier(&scope.schema),
            quote_identifier(object_name),
            OBJECT_ROW_LIMIT
        ),
        vec![],
    )
}

pub fn customer_order_history(customer_id: i32) -> Statement {
    Statement::rows(
        format!("SELECT * FROM {ORDER_HISTORY_FUNCTION}($1)"),
        vec![SqlParam::Int(Some(customer_id))],
    )
}

pub fn low_stock_products(filter: &LowStockFilter) -> Statement {
    Statement::rows(
        format!("SELECT * FROM {LOW_STOCK_FUNCTION}($1, $2::numeric)"),
        vec![
            SqlParam::Int(filter.warehouse_id),
            SqlParam::Float(filter.threshold),
        ],
    )
}

pub fn create_order(req: &NewOrderRequest) -> Statement {
    Statement::rows(
        format!("SELECT * FROM {CREATE_ORDER_FUNCTION}($1, $2, $3, $4)"),
        vec![
            SqlParam::Int(Some(req.customer_id)),
            SqlParam::Int(Some(req.employee_id)),
            SqlParam::Date(req.required_delivery_date),
            SqlParam::Text(req.shipping_address.clone()),
        ],
    )
}

pub fn add_order_item(req: &NewOrderItemRequest) -> Statement {
    Statement::command(
        format!("CALL {ADD_ITEM_PROCEDURE}($1, $2, $3, $4)"),
        vec![
            SqlParam::Int(Some(req.order_id)),
            SqlParam::Int(Some(req.product_id)),
            SqlParam::Int(Some(req.warehouse_id)),
            SqlParam::Int(Some(req.quantity)),
        ],
    )
}

/// Double-quote an identifier, doubling any embedded quote.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
