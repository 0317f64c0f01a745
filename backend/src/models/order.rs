use crate::error::AppError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use storefront_shared::{OrderItemResponse, OrderResponse, OrderStatus};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub order_date: DateTime<Utc>,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A line of a placed order. `unit_price` is the product price captured
/// at purchase time; lines never change after the order is placed.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Insert the order row inside the placement transaction. The total
    /// starts at zero and is set once the lines are written.
    pub async fn insert_tx(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
        shipping_address: &str,
    ) -> Result<Self, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (user_id, shipping_address)
            VALUES ($1, $2)
            RETURNING id, user_id, order_date, total_price, status, shipping_address,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(shipping_address)
        .fetch_one(&mut **tx)
        .await?;

        Ok(order)
    }

    pub async fn set_total_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        total: Decimal,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE orders SET total_price = $1, updated_at = NOW() WHERE id = $2")
            .bind(total)
            .bind(id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Find order by ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, order_date, total_price, status, shipping_address,
                   created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(order)
    }

    /// Find and row-lock an order for a status transition.
    pub async fn find_by_id_for_update_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<Self>, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, order_date, total_price, status, shipping_address,
                   created_at, updated_at
            FROM orders
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(order)
    }

    /// List orders, optionally filtered by user and status, newest first.
    pub async fn list(
        pool: &PgPool,
        user_id: Option<Uuid>,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, order_date, total_price, status, shipping_address,
                   created_at, updated_at
            FROM orders
            WHERE ($1::uuid IS NULL OR user_id = $1)
              AND ($2::order_status IS NULL OR status = $2)
            ORDER BY order_date DESC, id ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(orders)
    }

    pub async fn count(
        pool: &PgPool,
        user_id: Option<Uuid>,
        status: Option<OrderStatus>,
    ) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM orders
            WHERE ($1::uuid IS NULL OR user_id = $1)
              AND ($2::order_status IS NULL OR status = $2)
            "#,
        )
        .bind(user_id)
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    pub async fn update_status_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE orders SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub async fn update_shipping_address_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        shipping_address: &str,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE orders SET shipping_address = $1, updated_at = NOW() WHERE id = $2")
            .bind(shipping_address)
            .bind(id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Hard delete. Order items go with the order (cascade). This is an
    /// administrative erase; it does not return stock to inventory.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub fn to_response(&self, items: Vec<OrderItemResponse>) -> OrderResponse {
        OrderResponse {
            id: self.id,
            user_id: self.user_id,
            order_date: self.order_date,
            total_price: self.total_price,
            status: self.status,
            shipping_address: self.shipping_address.clone(),
            items,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl OrderItem {
    pub async fn insert_tx(
        tx: &mut Transaction<'_, Postgres>,
        order_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<Self, AppError> {
        let item = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity, unit_price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, order_id, product_id, quantity, unit_price, created_at
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .fetch_one(&mut **tx)
        .await?;

        Ok(item)
    }

    pub async fn find_by_order(pool: &PgPool, order_id: Uuid) -> Result<Vec<Self>, AppError> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, quantity, unit_price, created_at
            FROM order_items
            WHERE order_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(order_id)
        .fetch_all(pool)
        .await?;

        Ok(items)
    }

    /// Lines of an order, read under the cancellation row lock.
    pub async fn find_by_order_tx(
        tx: &mut Transaction<'_, Postgres>,
        order_id: Uuid,
    ) -> Result<Vec<Self>, AppError> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, quantity, unit_price, created_at
            FROM order_items
            WHERE order_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(order_id)
        .fetch_all(&mut **tx)
        .await?;

        Ok(items)
    }

    pub fn to_response(&self) -> OrderItemResponse {
        OrderItemResponse {
            id: self.id,
            order_id: self.order_id,
            product_id: self.product_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
            line_total: self.unit_price * Decimal::from(self.quantity),
        }
    }
}
