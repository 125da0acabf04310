use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::application::query_service::WholesaleService;
use crate::domain::requests::LowStockFilter;
use crate::errors::AppError;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LowStockParams {
    /// Warehouse to inspect. Omitted or non-numeric means every warehouse.
    pub warehouse_id: Option<String>,
    /// Alert threshold. Omitted or non-numeric means 100.
    pub threshold: Option<String>,
}

impl LowStockParams {
    /// The first occurrence of each key wins; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self {
            warehouse_id: None,
            threshold: None,
        };
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "warehouseId" => &mut params.warehouse_id,
                "threshold" => &mut params.threshold,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

/// GET /api/customer/{customerId}/orders
#[utoipa::path(
    get,
    path = "/api/customer/{customerId}/orders",
    params(
        ("customerId" = i32, Path, description = "Customer id"),
    ),
    responses(
        (status = 200, description = "Order history rows"),
        (status = 400, description = "Invalid Customer ID", body = crate::errors::ErrorBody),
        (status = 500, description = "Database error", body = crate::errors::ErrorBody),
    ),
    tag = "reports"
)]
pub async fn customer_order_history(
    service: web::Data<WholesaleService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();

    let rows = web::block(move || service.customer_order_history(&customer_id))
        .await?
        .map_err(|e| AppError::fetching("customer order history", e))?;
    Ok(HttpResponse::Ok().json(rows))
}

/// GET /api/products/lowstock
#[utoipa::path(
    get,
    path = "/api/products/lowstock",
    params(LowStockParams),
    responses(
        (status = 200, description = "Products below the threshold"),
        (status = 500, description = "Database error", body = crate::errors::ErrorBody),
    ),
    tag = "reports"
)]
pub async fn low_stock_products(
    service: web::Data<WholesaleService>,
    query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    let params = LowStockParams::from_pairs(query.into_inner());
    let filter =
        LowStockFilter::from_query(params.warehouse_id.as_deref(), params.threshold.as_deref());

    let rows = web::block(move || service.low_stock_products(&filter))
        .await?
        .map_err(|e| AppError::fetching("low stock products", e))?;
    Ok(HttpResponse::Ok().json(rows))
}
