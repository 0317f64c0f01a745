use crate::types::OrderStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// User DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,

    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Product DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    pub price: Decimal,

    #[validate(length(min = 1, max = 100))]
    pub category: String,

    #[validate(range(min = 0))]
    pub stock_quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    pub price: Option<Decimal>,

    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,

    #[validate(range(min = 0))]
    pub stock_quantity: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub stock_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Order DTOs
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderLineRequest {
    pub product_id: Uuid,

    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 500))]
    pub shipping_address: String,

    #[validate(length(min = 1, max = 100))]
    pub items: Vec<OrderLineRequest>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateOrderRequest {
    /// Target status, parsed against the transition table.
    pub status: Option<String>,

    #[validate(length(min = 1, max = 500))]
    pub shipping_address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub order_date: DateTime<Utc>,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub items: Vec<OrderItemResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Reporting DTOs
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct TopSpenderRow {
    pub user_id: Uuid,
    pub username: String,
    pub order_count: i64,
    pub total_spent: Decimal,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductRevenueRow {
    pub product_id: Uuid,
    pub name: String,
    pub category: String,
    pub units_sold: i64,
    pub revenue: Decimal,
    pub revenue_rank: i64,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct MonthlyRevenueRow {
    pub month: DateTime<Utc>,
    pub revenue: Decimal,
    pub order_count: i64,
    /// Percentage change against the previous month; absent for the
    /// first bucket and for months following a zero-revenue month.
    pub growth_pct: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct LowStockRow {
    pub product_id: Uuid,
    pub name: String,
    pub category: String,
    pub stock_quantity: i32,
}

// Common pagination and filtering
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,

    #[validate(range(min = 0))]
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}
