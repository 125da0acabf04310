use actix_web::{web, HttpResponse};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::application::query_service::{CreateOrderOutcome, WholesaleService};
use crate::domain::requests::{NewOrderItemRequest, NewOrderRequest};
use crate::errors::AppError;

pub const ORDER_CREATED: &str = "Order created successfully.";
pub const ORDER_UNCONFIRMED: &str =
    "Order creation initiated, but Order ID was not returned by the procedure. Check the procedure logic or database logs.";
pub const ITEM_ADDED: &str = "Product added to or updated on the order.";

// ── Request / response DTOs ──────────────────────────────────────────────────

/// Fields are kept as raw JSON so numeric strings are accepted and the
/// validation messages stay specific.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderBody {
    #[schema(value_type = Option<i32>)]
    pub customer_id: Option<Value>,
    #[schema(value_type = Option<i32>)]
    pub employee_id: Option<Value>,
    /// `YYYY-MM-DD`
    #[schema(value_type = Option<String>)]
    pub required_delivery_date: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub shipping_address: Option<Value>,
}

/// `Some(Value::Null)` for an explicit `null`, `None` only when the key is
/// missing.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddOrderItemBody {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub product_id: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub warehouse_id: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub quantity: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    #[schema(value_type = i64)]
    pub order_id: Value,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/orders
///
/// Calls the order-creation procedure. A call that raises no error but
/// returns no identity row is answered with 200 and a warning rather than
/// treated as a failure, since the order may well exist.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderBody,
    responses(
        (status = 201, description = "Order created", body = CreateOrderResponse),
        (status = 200, description = "Procedure ran but returned no order id", body = MessageResponse),
        (status = 400, description = "Missing or non-numeric ids", body = crate::errors::ErrorBody),
        (status = 500, description = "Database error", body = crate::errors::ErrorBody),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<WholesaleService>,
    body: web::Json<CreateOrderBody>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let req = NewOrderRequest::parse(
        body.customer_id.as_ref(),
        body.employee_id.as_ref(),
        body.required_delivery_date.as_ref(),
        body.shipping_address.as_ref(),
    )?;

    let outcome = web::block(move || service.create_order(&req)).await??;

    Ok(match outcome {
        CreateOrderOutcome::Created(order_id) => {
            HttpResponse::Created().json(CreateOrderResponse {
                order_id,
                message: ORDER_CREATED.to_string(),
            })
        }
        CreateOrderOutcome::Unconfirmed => HttpResponse::Ok().json(MessageResponse {
            message: ORDER_UNCONFIRMED.to_string(),
        }),
    })
}

/// POST /api/orders/{orderId}/items
///
/// Calls the add-item procedure. Business-rule failures arrive as raised
/// database errors and are returned as 500 with the procedure's message.
#[utoipa::path(
    post,
    path = "/api/orders/{orderId}/items",
    params(
        ("orderId" = i32, Path, description = "Order id"),
    ),
    request_body = AddOrderItemBody,
    responses(
        (status = 200, description = "Item added or updated", body = MessageResponse),
        (status = 400, description = "Invalid order id or item fields", body = crate::errors::ErrorBody),
        (status = 500, description = "Database or procedure error", body = crate::errors::ErrorBody),
    ),
    tag = "orders"
)]
pub async fn add_order_item(
    service: web::Data<WholesaleService>,
    path: web::Path<String>,
    body: web::Json<AddOrderItemBody>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let body = body.into_inner();
    let req = NewOrderItemRequest::parse(
        &order_id,
        body.product_id.as_ref(),
        body.warehouse_id.as_ref(),
        body.quantity.as_ref(),
    )?;

    web::block(move || service.add_order_item(&req)).await??;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: ITEM_ADDED.to_string(),
    }))
}
