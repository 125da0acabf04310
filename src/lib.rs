pub mod application;
pub mod client;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;

#[cfg(test)]
pub(crate) mod test_support;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use application::query_service::WholesaleService;
pub use db::{create_pool, DbPool};

use errors::AppError;

/// Reference rendition of the database contract; applied only on request.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("Applied {} reference schema migration(s)", applied.len());
    Ok(())
}

/// Registers the `/api` routes and their shared state.
pub fn configure(service: WholesaleService) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(service.clone()))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(format!("Invalid JSON body: {err}")).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(format!("Invalid query string: {err}")).into()
            }))
            .service(
                web::scope("/api")
                    .route("/tables", web::get().to(handlers::catalog::list_tables))
                    .route("/views", web::get().to(handlers::catalog::list_views))
                    .route(
                        "/data/{objectName}",
                        web::get().to(handlers::catalog::object_rows),
                    )
                    .route(
                        "/customer/{customerId}/orders",
                        web::get().to(handlers::reports::customer_order_history),
                    )
                    .route(
                        "/products/lowstock",
                        web::get().to(handlers::reports::low_stock_products),
                    )
                    .route("/orders", web::post().to(handlers::orders::create_order))
                    .route(
                        "/orders/{orderId}/items",
                        web::post().to(handlers::orders::add_order_item),
                    ),
            );
    }
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    service: WholesaleService,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let routes = configure(service);
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(routes.clone())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
