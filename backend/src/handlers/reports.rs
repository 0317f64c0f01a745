use crate::error::AppError;
use crate::services::ReportService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use storefront_shared::{DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_REPORT_LIMIT};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ReportLimitQuery {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LowStockQuery {
    #[validate(range(min = 0))]
    pub threshold: Option<i32>,
}

/// Users ranked by lifetime spend.
pub async fn top_spenders(
    query: web::Query<ReportLimitQuery>,
    report_service: web::Data<ReportService>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let rows = report_service
        .top_spenders(query.limit.unwrap_or(DEFAULT_REPORT_LIMIT))
        .await?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Products ranked by revenue.
pub async fn product_revenue(
    query: web::Query<ReportLimitQuery>,
    report_service: web::Data<ReportService>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let rows = report_service
        .product_revenue(query.limit.unwrap_or(DEFAULT_REPORT_LIMIT))
        .await?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Month-over-month revenue trend.
pub async fn monthly_revenue(
    report_service: web::Data<ReportService>,
) -> Result<HttpResponse, AppError> {
    let rows = report_service.monthly_revenue().await?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Products at or below the stock threshold.
pub async fn low_stock(
    query: web::Query<LowStockQuery>,
    report_service: web::Data<ReportService>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let rows = report_service
        .low_stock(query.threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD))
        .await?;

    Ok(HttpResponse::Ok().json(rows))
}
