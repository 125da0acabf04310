use actix_web::{web, HttpResponse};

use crate::application::query_service::WholesaleService;
use crate::errors::AppError;

/// GET /api/tables
///
/// Names of the base tables in the configured schema.
#[utoipa::path(
    get,
    path = "/api/tables",
    responses(
        (status = 200, description = "Table names", body = Vec<String>),
        (status = 500, description = "Database error", body = crate::errors::ErrorBody),
    ),
    tag = "catalog"
)]
pub async fn list_tables(service: web::Data<WholesaleService>) -> Result<HttpResponse, AppError> {
    let tables = web::block(move || service.list_tables())
        .await?
        .map_err(|e| AppError::fetching("tables", e))?;
    Ok(HttpResponse::Ok().json(tables))
}

/// GET /api/views
#[utoipa::path(
    get,
    path = "/api/views",
    responses(
        (status = 200, description = "View names", body = Vec<String>),
        (status = 500, description = "Database error", body = crate::errors::ErrorBody),
    ),
    tag = "catalog"
)]
pub async fn list_views(service: web::Data<WholesaleService>) -> Result<HttpResponse, AppError> {
    let views = web::block(move || service.list_views())
        .await?
        .map_err(|e| AppError::fetching("views", e))?;
    Ok(HttpResponse::Ok().json(views))
}

/// GET /api/data/{objectName}
///
/// First 100 rows of a table or view. The name is restricted to
/// `[A-Za-z0-9_]+` before any SQL is built and is matched case-sensitively.
#[utoipa::path(
    get,
    path = "/api/data/{objectName}",
    params(
        ("objectName" = String, Path, description = "Table or view name"),
    ),
    responses(
        (status = 200, description = "Up to 100 rows, one JSON object per row"),
        (status = 400, description = "Invalid object name format", body = crate::errors::ErrorBody),
        (status = 500, description = "Database error", body = crate::errors::ErrorBody),
    ),
    tag = "catalog"
)]
pub async fn object_rows(
    service: web::Data<WholesaleService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let object_name = path.into_inner();
    let what = format!("data from {}.{object_name}", service.scope().schema);

    let rows = web::block(move || service.object_rows(&object_name))
        .await?
        .map_err(|e| AppError::fetching(&what, e))?;
    Ok(HttpResponse::Ok().json(rows))
}
