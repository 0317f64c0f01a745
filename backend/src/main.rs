use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing::{info, Level};

use storefront_backend::config::AppConfig;
use storefront_backend::database::Database;
use storefront_backend::error::AppError;
use storefront_backend::routes;
use storefront_backend::services::{AccountService, CatalogService, OrderService, ReportService};

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    // Load configuration
    let config = AppConfig::from_env()?;
    info!(
        "Starting storefront backend on {}:{}",
        config.host, config.port
    );

    // Initialize database
    let database = Database::new(&config).await?;

    // Run migrations
    database.migrate().await?;

    // Initialize services
    let account_service = AccountService::new(database.pool().clone());
    let catalog_service = CatalogService::new(database.pool().clone());
    let order_service = OrderService::new(database.pool().clone());
    let report_service = ReportService::new(database.pool().clone());

    // Start HTTP server
    let bind_addr = format!("{}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(web::Data::new(database.clone()))
            .app_data(web::Data::new(account_service.clone()))
            .app_data(web::Data::new(catalog_service.clone()))
            .app_data(web::Data::new(order_service.clone()))
            .app_data(web::Data::new(report_service.clone()))
            .configure(routes::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
    .map_err(AppError::from)
}
