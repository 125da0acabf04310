use std::sync::Arc;

use dotenvy::dotenv;
use wholesale_service::config::Config;
use wholesale_service::infrastructure::executor::DieselQueryExecutor;
use wholesale_service::{build_server, create_pool, run_migrations, WholesaleService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(std::io::Error::other)?;

    let pool = create_pool(&config.database_url, config.pool_size).map_err(std::io::Error::other)?;
    if config.apply_reference_schema {
        run_migrations(&pool).map_err(std::io::Error::other)?;
    }

    let service = WholesaleService::new(
        Arc::new(DieselQueryExecutor::new(pool)),
        config.scope.clone(),
    );

    log::info!(
        "Starting server at http://{}:{} (schema '{}')",
        config.host,
        config.port,
        config.scope.schema
    );

    build_server(service, &config.host, config.port)?.await
}
