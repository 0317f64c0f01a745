use crate::error::AppError;
use crate::models::{Pagination, Product};
use crate::utils::validation::validate_price;
use sqlx::PgPool;
use storefront_shared::{
    CreateProductRequest, PaginatedResponse, ProductResponse, UpdateProductRequest,
};
use tracing::info;
use uuid::Uuid;

/// Product catalog management.
#[derive(Clone)]
pub struct CatalogService {
    db_pool: PgPool,
}

/// Listing filters on top of pagination.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl CatalogService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    pub async fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> Result<ProductResponse, AppError> {
        validate_price(request.price).map_err(|e| AppError::Validation(e.code.to_string()))?;

        let product = Product::create(
            &self.db_pool,
            &request.name,
            request.description.as_deref(),
            request.price,
            &request.category,
            request.stock_quantity,
        )
        .await?;

        info!("Created product {} ({})", product.name, product.id);

        Ok(product.to_response())
    }

    pub async fn get_product(&self, id: Uuid) -> Result<ProductResponse, AppError> {
        let product = Product::find_by_id(&self.db_pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("product {} not found", id)))?;

        Ok(product.to_response())
    }

    pub async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<PaginatedResponse<ProductResponse>, AppError> {
        let page = Pagination::new(filter.limit, filter.offset);
        let category = filter.category.as_deref();
        let search = filter.search.as_deref();

        let products =
            Product::list(&self.db_pool, category, search, page.limit, page.offset).await?;
        let total = Product::count(&self.db_pool, category, search).await?;

        Ok(PaginatedResponse {
            data: products.iter().map(Product::to_response).collect(),
            total,
            limit: page.limit,
            offset: page.offset,
            has_more: page.offset + page.limit < total,
        })
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        request: UpdateProductRequest,
    ) -> Result<ProductResponse, AppError> {
        if let Some(price) = request.price {
            validate_price(price).map_err(|e| AppError::Validation(e.code.to_string()))?;
        }

        if let Some(stock) = request.stock_quantity {
            if stock < 0 {
                return Err(AppError::Validation(
                    "stock_quantity must not be negative".to_string(),
                ));
            }
        }

        let product = Product::update(
            &self.db_pool,
            id,
            request.name.as_deref(),
            request.description.as_deref(),
            request.price,
            request.category.as_deref(),
            request.stock_quantity,
        )
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {} not found", id)))?;

        Ok(product.to_response())
    }

    /// Delete a product. The engine rejects the delete with a foreign-key
    /// violation (mapped to 409) while order items still reference it.
    pub async fn delete_product(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = Product::delete(&self.db_pool, id).await?;

        if !deleted {
            return Err(AppError::NotFound(format!("product {} not found", id)));
        }

        info!("Deleted product {}", id);

        Ok(())
    }
}
