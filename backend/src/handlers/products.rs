use crate::error::AppError;
use crate::services::catalog_service::{CatalogService, ProductFilter};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use storefront_shared::{CreateProductRequest, UpdateProductRequest};
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ProductListQuery {
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub search: Option<String>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,

    #[validate(range(min = 0))]
    pub offset: Option<i64>,
}

/// List products with optional category filter and name search.
pub async fn list_products(
    query: web::Query<ProductListQuery>,
    catalog_service: web::Data<CatalogService>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let query = query.into_inner();
    let products = catalog_service
        .list_products(ProductFilter {
            category: query.category,
            search: query.search,
            limit: query.limit,
            offset: query.offset,
        })
        .await?;

    Ok(HttpResponse::Ok().json(products))
}

/// Create a new product.
pub async fn create_product(
    request: web::Json<CreateProductRequest>,
    catalog_service: web::Data<CatalogService>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    debug!("Creating product '{}'", request.name);

    let product = catalog_service.create_product(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(product))
}

/// Get product by ID.
pub async fn get_product(
    product_id: web::Path<Uuid>,
    catalog_service: web::Data<CatalogService>,
) -> Result<HttpResponse, AppError> {
    let product = catalog_service.get_product(*product_id).await?;

    Ok(HttpResponse::Ok().json(product))
}

/// Update product fields.
pub async fn update_product(
    product_id: web::Path<Uuid>,
    request: web::Json<UpdateProductRequest>,
    catalog_service: web::Data<CatalogService>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let product = catalog_service
        .update_product(*product_id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(product))
}

/// Delete a product. Returns 409 while order items reference it.
pub async fn delete_product(
    product_id: web::Path<Uuid>,
    catalog_service: web::Data<CatalogService>,
) -> Result<HttpResponse, AppError> {
    catalog_service.delete_product(*product_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "product deleted" })))
}
