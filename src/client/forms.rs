use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct FormError(pub &'static str);

pub const ORDER_IDS_INVALID: FormError =
    FormError("Customer ID and Employee ID are required and must be numbers.");
pub const ITEM_FIELDS_INVALID: FormError = FormError(
    "All fields (order ID, product ID, warehouse ID, quantity) are required and must be numbers.",
);
pub const QUANTITY_INVALID: FormError = FormError("Quantity must be greater than zero.");

/// Create-order form, checked before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderForm {
    pub customer_id: i32,
    pub employee_id: i32,
    pub required_delivery_date: Option<String>,
    pub shipping_address: Option<String>,
}

impl OrderForm {
    pub fn from_inputs(
        customer_id: &str,
        employee_id: &str,
        required_delivery_date: &str,
        shipping_address: &str,
    ) -> Result<Self, FormError> {
        let (Some(customer_id), Some(employee_id)) = (parse_id(customer_id), parse_id(employee_id))
        else {
            return Err(ORDER_IDS_INVALID);
        };
        Ok(Self {
            customer_id,
            employee_id,
            required_delivery_date: non_blank(required_delivery_date),
            shipping_address: non_blank(shipping_address.trim()),
        })
    }
}

/// Add-item form. The order id travels in the URL, not the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemForm {
    #[serde(skip)]
    pub order_id: i32,
    pub product_id: i32,
    pub warehouse_id: i32,
    pub quantity: i32,
}

impl ItemForm {
    pub fn from_inputs(
        order_id: &str,
        product_id: &str,
        warehouse_id: &str,
        quantity: &str,
    ) -> Result<Self, FormError> {
        let (Some(order_id), Some(product_id), Some(warehouse_id), Some(quantity)) = (
            parse_id(order_id),
            parse_id(product_id),
            parse_id(warehouse_id),
            parse_id(quantity),
        ) else {
            return Err(ITEM_FIELDS_INVALID);
        };
        if quantity <= 0 {
            return Err(QUANTITY_INVALID);
        }
        Ok(Self {
            order_id,
            product_id,
            warehouse_id,
            quantity,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("orders/{}/items", self.order_id)
    }
}

fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

fn non_blank(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_string())
}
