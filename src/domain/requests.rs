use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use super::errors::QueryError;

pub const DEFAULT_LOW_STOCK_THRESHOLD: f64 = 100.0;

pub const INVALID_OBJECT_NAME: &str = "Invalid object name format.";
pub const INVALID_CUSTOMER_ID: &str = "Invalid Customer ID";
pub const ORDER_IDS_REQUIRED: &str = "Customer ID and Employee ID are required.";
pub const ORDER_IDS_NOT_NUMERIC: &str = "Customer ID and Employee ID must be numbers.";
pub const INVALID_DELIVERY_DATE: &str =
    "Required delivery date must be a date in YYYY-MM-DD format.";
pub const INVALID_ORDER_ID: &str = "Order ID in URL must be a number.";
pub const ITEM_FIELDS_REQUIRED: &str = "Product ID, Warehouse ID, and Quantity are required.";
pub const ITEM_FIELDS_NOT_NUMERIC: &str = "Product ID, Warehouse ID, and Quantity must be numbers.";
pub const QUANTITY_NOT_POSITIVE: &str = "Quantity must be greater than zero.";

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderRequest {
    pub customer_id: i32,
    pub employee_id: i32,
    pub required_delivery_date: Option<NaiveDate>,
    pub shipping_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItemRequest {
    pub order_id: i32,
    pub product_id: i32,
    pub warehouse_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LowStockFilter {
    /// `None` means every warehouse.
    pub warehouse_id: Option<i32>,
    pub threshold: f64,
}

impl Default for LowStockFilter {
    fn default() -> Self {
        Self {
            warehouse_id: None,
            threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl LowStockFilter {
    /// Lenient: unparseable values fall back to the defaults instead of failing.
    /// A fractional warehouse id is truncated.
    pub fn from_query(warehouse_id: Option<&str>, threshold: Option<&str>) -> Self {
        let warehouse_id = warehouse_id.and_then(|raw| {
            let raw = raw.trim();
            raw.parse::<i32>()
                .ok()
                .or_else(|| raw.parse::<f64>().ok().and_then(truncate_to_i32))
        });
        let threshold = threshold
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|t| t.is_finite())
            .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);
        Self {
            warehouse_id,
            threshold,
        }
    }
}

impl NewOrderRequest {
    pub fn parse(
        customer_id: Option<&Value>,
        employee_id: Option<&Value>,
        required_delivery_date: Option<&Value>,
        shipping_address: Option<&Value>,
    ) -> Result<Self, QueryError> {
        if is_blank(customer_id) || is_blank(employee_id) {
            return Err(QueryError::validation(ORDER_IDS_REQUIRED));
        }
        let (Some(customer_id), Some(employee_id)) = (
            customer_id.and_then(coerce_int),
            employee_id.and_then(coerce_int),
        ) else {
            return Err(QueryError::validation(ORDER_IDS_NOT_NUMERIC));
        };

        Ok(Self {
            customer_id,
            employee_id,
            required_delivery_date: parse_optional_date(required_delivery_date)?,
            shipping_address: optional_text(shipping_address),
        })
    }
}

impl NewOrderItemRequest {
    /// Field presence is checked before numeric coercion; an explicit `null`
    /// counts as present and then fails the numeric check.
    pub fn parse(
        order_id: &str,
        product_id: Option<&Value>,
        warehouse_id: Option<&Value>,
        quantity: Option<&Value>,
    ) -> Result<Self, QueryError> {
        let order_id =
            parse_path_id(order_id).ok_or_else(|| QueryError::validation(INVALID_ORDER_ID))?;

        let (Some(product_id), Some(warehouse_id), Some(quantity)) =
            (product_id, warehouse_id, quantity)
        else {
            return Err(QueryError::validation(ITEM_FIELDS_REQUIRED));
        };

        let (Some(product_id), Some(warehouse_id), Some(quantity)) = (
            coerce_int(product_id),
            coerce_int(warehouse_id),
            coerce_int(quantity),
        ) else {
            return Err(QueryError::validation(ITEM_FIELDS_NOT_NUMERIC));
        };

        if quantity <= 0 {
            return Err(QueryError::validation(QUANTITY_NOT_POSITIVE));
        }

        Ok(Self {
            order_id,
            product_id,
            warehouse_id,
            quantity,
        })
    }
}

/// Table and view names are interpolated into SQL text, so only identifier
/// characters are accepted.
pub fn validate_object_name(name: &str) -> Result<&str, QueryError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(name)
    } else {
        Err(QueryError::validation(INVALID_OBJECT_NAME))
    }
}

pub fn parse_customer_id(raw: &str) -> Result<i32, QueryError> {
    parse_path_id(raw).ok_or_else(|| QueryError::validation(INVALID_CUSTOMER_ID))
}

fn parse_path_id(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

/// Integer coercion for JSON body fields: integers, finite floats (truncated)
/// and numeric strings are accepted.
pub fn coerce_int(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i32::try_from(i).ok()
            } else {
                n.as_f64().and_then(truncate_to_i32)
            }
        }
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}

fn truncate_to_i32(f: f64) -> Option<i32> {
    Some(f)
        .filter(|f| f.is_finite())
        .map(f64::trunc)
        .filter(|f| *f >= f64::from(i32::MIN) && *f <= f64::from(i32::MAX))
        .map(|f| f as i32)
}

/// Absent, `null`, `false`, `0` and `""` all count as "not provided".
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn parse_optional_date(value: Option<&Value>) -> Result<Option<NaiveDate>, QueryError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
            .map(Some)
            .map_err(|_| QueryError::validation(INVALID_DELIVERY_DATE)),
        Some(_) => Err(QueryError::validation(INVALID_DELIVERY_DATE)),
    }
}

fn optional_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}
