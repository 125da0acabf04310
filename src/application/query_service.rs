use std::sync::Arc;

use serde_json::Value;

use crate::domain::errors::QueryError;
use crate::domain::ports::QueryExecutor;
use crate::domain::requests::{
    parse_customer_id, validate_object_name, LowStockFilter, NewOrderItemRequest, NewOrderRequest,
};
use crate::domain::row::{first_value, Row};
use crate::infrastructure::statements::{self, CatalogScope};

/// Result of the order-creation procedure.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOrderOutcome {
    Created(Value),
    /// The call raised no error but returned no identity row.
    Unconfirmed,
}

/// Validates input, builds the statement and runs it. One executor call per
/// operation; rejected input never reaches the executor.
#[derive(Clone)]
pub struct WholesaleService {
    executor: Arc<dyn QueryExecutor>,
    scope: CatalogScope,
}

impl WholesaleService {
    pub fn new(executor: Arc<dyn QueryExecutor>, scope: CatalogScope) -> Self {
        Self { executor, scope }
    }

    pub fn scope(&self) -> &CatalogScope {
        &self.scope
    }

    pub fn list_tables(&self) -> Result<Vec<String>, QueryError> {
        let rows = self.executor.execute(&statements::list_tables(&self.scope))?;
        Ok(names(rows))
    }

    pub fn list_views(&self) -> Result<Vec<String>, QueryError> {
        let rows = self.executor.execute(&statements::list_views(&self.scope))?;
        Ok(names(rows))
    }

    /// Names are quoted, so PostgreSQL matches them case-sensitively:
    /// `Orders` does not find an `orders` table.
    pub fn object_rows(&self, object_name: &str) -> Result<Vec<Row>, QueryError> {
        let object_name = validate_object_name(object_name)?;
        self.executor
            .execute(&statements::object_rows(&self.scope, object_name))
    }

    pub fn customer_order_history(&self, customer_id: &str) -> Result<Vec<Row>, QueryError> {
        let customer_id = parse_customer_id(customer_id)?;
        self.executor
            .execute(&statements::customer_order_history(customer_id))
    }

    pub fn low_stock_products(&self, filter: &LowStockFilter) -> Result<Vec<Row>, QueryError> {
        self.executor.execute(&statements::low_stock_products(filter))
    }

    pub fn create_order(&self, req: &NewOrderRequest) -> Result<CreateOrderOutcome, QueryError> {
        let rows = self.executor.execute(&statements::create_order(req))?;
        match first_value(&rows) {
            Some(id) => Ok(CreateOrderOutcome::Created(id.clone())),
            None => {
                log::warn!(
                    "{} may have executed, but no order id was returned: {:?}",
                    statements::CREATE_ORDER_FUNCTION,
                    rows
                );
                Ok(CreateOrderOutcome::Unconfirmed)
            }
        }
    }

    /// Insert-or-update is decided by the procedure; a raised error is the
    /// only failure signal.
    pub fn add_order_item(&self, req: &NewOrderItemRequest) -> Result<(), QueryError> {
        self.executor.execute(&statements::add_order_item(req))?;
        Ok(())
    }
}

/// First column of every row as text; the catalog queries select one column.
fn names(rows: Vec<Row>) -> Vec<String> {
    rows.into_iter()
        .filter_map(|row| row.into_iter().next())
        .filter_map(|(_, value)| match value {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => Some(other.to_string()),
        })
        .collect()
}
