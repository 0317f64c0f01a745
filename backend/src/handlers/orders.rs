use crate::error::AppError;
use crate::services::order_service::{OrderFilter, OrderService};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use storefront_shared::{CreateOrderRequest, OrderStatus, UpdateOrderRequest};
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct OrderListQuery {
    pub user_id: Option<Uuid>,
    pub status: Option<String>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,

    #[validate(range(min = 0))]
    pub offset: Option<i64>,
}

/// List orders with optional user and status filters.
pub async fn list_orders(
    query: web::Query<OrderListQuery>,
    order_service: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let query = query.into_inner();
    let status = match &query.status {
        Some(raw) => Some(
            raw.parse::<OrderStatus>()
                .map_err(|e| AppError::Validation(e.to_string()))?,
        ),
        None => None,
    };

    let orders = order_service
        .list_orders(OrderFilter {
            user_id: query.user_id,
            status,
            limit: query.limit,
            offset: query.offset,
        })
        .await?;

    Ok(HttpResponse::Ok().json(orders))
}

/// Place a new order.
pub async fn create_order(
    request: web::Json<CreateOrderRequest>,
    order_service: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    debug!(
        "Placing order for user {} with {} line(s)",
        request.user_id,
        request.items.len()
    );

    let order = order_service.place_order(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(order))
}

/// Get order by ID, including its items.
pub async fn get_order(
    order_id: web::Path<Uuid>,
    order_service: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    let order = order_service.get_order(*order_id).await?;

    Ok(HttpResponse::Ok().json(order))
}

/// Get the items of an order.
pub async fn get_order_items(
    order_id: web::Path<Uuid>,
    order_service: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    let items = order_service.get_order_items(*order_id).await?;

    Ok(HttpResponse::Ok().json(items))
}

/// Apply a status transition or shipping-address change.
pub async fn update_order(
    order_id: web::Path<Uuid>,
    request: web::Json<UpdateOrderRequest>,
    order_service: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let order = order_service
        .update_order(*order_id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(order))
}

/// Delete an order and, by cascade, its items.
pub async fn delete_order(
    order_id: web::Path<Uuid>,
    order_service: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    order_service.delete_order(*order_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "order deleted" })))
}
