use utoipa::OpenApi;

use crate::errors::ErrorBody;
use crate::handlers::{catalog, orders, reports};

#[derive(OpenApi)]
#[openapi(
    paths(
        catalog::list_tables,
        catalog::list_views,
        catalog::object_rows,
        reports::customer_order_history,
        reports::low_stock_products,
        orders::create_order,
        orders::add_order_item,
    ),
    components(schemas(
        ErrorBody,
        orders::CreateOrderBody,
        orders::AddOrderItemBody,
        orders::CreateOrderResponse,
        orders::MessageResponse,
    )),
    tags(
        (name = "catalog", description = "Tables, views and their rows"),
        (name = "reports", description = "Order history and stock reports"),
        (name = "orders", description = "Order and order item creation"),
    )
)]
pub struct ApiDoc;
