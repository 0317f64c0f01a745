use crate::error::AppError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use storefront_shared::{LowStockRow, ProductResponse};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub stock_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a new product.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        description: Option<&str>,
        price: Decimal,
        category: &str,
        stock_quantity: i32,
    ) -> Result<Self, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price, category, stock_quantity)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, price, category, stock_quantity, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(stock_quantity)
        .fetch_one(pool)
        .await?;

        Ok(product)
    }

    /// Find product by ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, category, stock_quantity, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(product)
    }

    /// Find product by ID inside an open transaction, so placement reads
    /// the same row version it decrements.
    pub async fn find_by_id_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<Self>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, category, stock_quantity, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(product)
    }

    /// List products, optionally filtered by category and a name search.
    pub async fn list(
        pool: &PgPool,
        category: Option<&str>,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, AppError> {
        let pattern = search.map(|s| format!("%{}%", s));

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, category, stock_quantity, created_at, updated_at
            FROM products
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR name ILIKE $2)
            ORDER BY created_at DESC, id ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(category)
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(products)
    }

    pub async fn count(
        pool: &PgPool,
        category: Option<&str>,
        search: Option<&str>,
    ) -> Result<i64, AppError> {
        let pattern = search.map(|s| format!("%{}%", s));

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM products
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR name ILIKE $2)
            "#,
        )
        .bind(category)
        .bind(pattern)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Partially update a product. Absent fields keep their current value.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        price: Option<Decimal>,
        category: Option<&str>,
        stock_quantity: Option<i32>,
    ) -> Result<Option<Self>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                category = COALESCE($5, category),
                stock_quantity = COALESCE($6, stock_quantity),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, price, category, stock_quantity, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(stock_quantity)
        .fetch_optional(pool)
        .await?;

        Ok(product)
    }

    /// Hard delete. Rejected by the engine (FK RESTRICT) while any order
    /// item still references the product; the violation surfaces as 409.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Conditionally decrement stock inside a placement transaction.
    /// Returns false when the remaining stock is insufficient, in which
    /// case nothing was changed and the caller must roll back.
    pub async fn decrement_stock_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        amount: i32,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock_quantity = stock_quantity - $1, updated_at = NOW()
            WHERE id = $2 AND stock_quantity >= $1
            "#,
        )
        .bind(amount)
        .bind(id)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Return reserved units to inventory when an order is cancelled.
    pub async fn restock_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        amount: i32,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE products
            SET stock_quantity = stock_quantity + $1, updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(amount)
        .bind(id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Products at or below the given stock threshold, lowest first.
    pub async fn low_stock(pool: &PgPool, threshold: i32) -> Result<Vec<LowStockRow>, AppError> {
        let rows = sqlx::query_as::<_, LowStockRow>(
            r#"
            SELECT id AS product_id, name, category, stock_quantity
            FROM products
            WHERE stock_quantity <= $1
            ORDER BY stock_quantity ASC, id ASC
            "#,
        )
        .bind(threshold)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    pub fn to_response(&self) -> ProductResponse {
        ProductResponse {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            category: self.category.clone(),
            stock_quantity: self.stock_quantity,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
