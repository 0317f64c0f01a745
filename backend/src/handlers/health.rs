use crate::database::Database;
use actix_web::{get, web, HttpResponse, Result};
use serde_json::json;

#[get("/health")]
pub async fn health_check(database: web::Data<Database>) -> Result<HttpResponse> {
    let db_health = database.health_check().await.ok();
    let db_healthy = db_health.as_ref().map(|h| h.is_healthy).unwrap_or(false);

    Ok(HttpResponse::Ok().json(json!({
        "status": if db_healthy { "healthy" } else { "degraded" },
        "service": "storefront-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_healthy,
    })))
}
