use crate::error::AppError;
use crate::models::{Order, OrderItem, Pagination, Product, User};
use rust_decimal::Decimal;
use sqlx::PgPool;
use storefront_shared::{
    CreateOrderRequest, OrderItemResponse, OrderResponse, OrderStatus, PaginatedResponse,
    UpdateOrderRequest,
};
use tracing::{debug, info};
use uuid::Uuid;

/// Order lifecycle: transactional placement, status transitions, and the
/// administrative delete. Placement is the one multi-row write path in
/// the system; everything it touches commits together or not at all.
#[derive(Clone)]
pub struct OrderService {
    db_pool: PgPool,
}

/// Listing filters on top of pagination.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub user_id: Option<Uuid>,
    pub status: Option<OrderStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Sum of quantity x unit price across order lines.
pub fn compute_order_total(lines: &[(i32, Decimal)]) -> Decimal {
    lines
        .iter()
        .map(|(quantity, unit_price)| Decimal::from(*quantity) * *unit_price)
        .sum()
}

impl OrderService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Place an order: decrement stock, write the order row and its
    /// lines, and store the total, all in one transaction.
    ///
    /// The stock decrement is conditional (`stock_quantity >= n`), so two
    /// concurrent placements of the last unit serialize on the product
    /// row and exactly one succeeds. Any failure drops the transaction,
    /// which rolls everything back.
    pub async fn place_order(&self, request: CreateOrderRequest) -> Result<OrderResponse, AppError> {
        for line in &request.items {
            if line.quantity < 1 {
                return Err(AppError::Validation(
                    "order line quantity must be at least 1".to_string(),
                ));
            }
        }

        let user = User::find_by_id(&self.db_pool, request.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {} not found", request.user_id)))?;

        if !user.is_active {
            return Err(AppError::Validation(
                "account is disabled and cannot place orders".to_string(),
            ));
        }

        debug!(
            "Placing order for user {} with {} line(s)",
            user.id,
            request.items.len()
        );

        let mut tx = self.db_pool.begin().await?;

        let mut order =
            Order::insert_tx(&mut tx, request.user_id, &request.shipping_address).await?;

        let mut lines = Vec::with_capacity(request.items.len());
        let mut items = Vec::with_capacity(request.items.len());

        for line in &request.items {
            let product = Product::find_by_id_tx(&mut tx, line.product_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("product {} not found", line.product_id))
                })?;

            let decremented =
                Product::decrement_stock_tx(&mut tx, line.product_id, line.quantity).await?;
            if !decremented {
                return Err(AppError::Conflict(format!(
                    "insufficient stock for product '{}'",
                    product.name
                )));
            }

            // Snapshot the current price onto the line; later catalog
            // price changes do not affect this order.
            let item = OrderItem::insert_tx(
                &mut tx,
                order.id,
                line.product_id,
                line.quantity,
                product.price,
            )
            .await?;

            lines.push((line.quantity, product.price));
            items.push(item.to_response());
        }

        let total = compute_order_total(&lines);
        Order::set_total_tx(&mut tx, order.id, total).await?;

        tx.commit().await?;

        info!(
            "Placed order {} for user {} totalling {}",
            order.id, request.user_id, total
        );

        order.total_price = total;
        Ok(order.to_response(items))
    }

    pub async fn get_order(&self, id: Uuid) -> Result<OrderResponse, AppError> {
        let order = Order::find_by_id(&self.db_pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("order {} not found", id)))?;

        let items = OrderItem::find_by_order(&self.db_pool, id).await?;

        Ok(order.to_response(items.iter().map(OrderItem::to_response).collect()))
    }

    pub async fn get_order_items(&self, id: Uuid) -> Result<Vec<OrderItemResponse>, AppError> {
        Order::find_by_id(&self.db_pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("order {} not found", id)))?;

        let items = OrderItem::find_by_order(&self.db_pool, id).await?;

        Ok(items.iter().map(OrderItem::to_response).collect())
    }

    pub async fn list_orders(
        &self,
        filter: OrderFilter,
    ) -> Result<PaginatedResponse<OrderResponse>, AppError> {
        let page = Pagination::new(filter.limit, filter.offset);

        let orders = Order::list(
            &self.db_pool,
            filter.user_id,
            filter.status,
            page.limit,
            page.offset,
        )
        .await?;
        let total = Order::count(&self.db_pool, filter.user_id, filter.status).await?;

        let mut responses = Vec::with_capacity(orders.len());
        for order in orders {
            let items = OrderItem::find_by_order(&self.db_pool, order.id).await?;
            responses.push(order.to_response(items.iter().map(OrderItem::to_response).collect()));
        }

        Ok(PaginatedResponse {
            data: responses,
            total,
            limit: page.limit,
            offset: page.offset,
            has_more: page.offset + page.limit < total,
        })
    }

    /// Apply a status transition and/or a shipping-address change. The
    /// order row is locked for the duration so concurrent transitions
    /// serialize. Cancelling an order that still holds stock returns the
    /// reserved units to inventory in the same transaction.
    pub async fn update_order(
        &self,
        id: Uuid,
        request: UpdateOrderRequest,
    ) -> Result<OrderResponse, AppError> {
        let next_status = match &request.status {
            Some(raw) => Some(
                raw.parse::<OrderStatus>()
                    .map_err(|e| AppError::Validation(e.to_string()))?,
            ),
            None => None,
        };

        if next_status.is_none() && request.shipping_address.is_none() {
            return Err(AppError::Validation("no fields to update".to_string()));
        }

        let mut tx = self.db_pool.begin().await?;

        let order = Order::find_by_id_for_update_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("order {} not found", id)))?;

        if let Some(address) = &request.shipping_address {
            if order.status != OrderStatus::Pending {
                return Err(AppError::Validation(
                    "shipping address can only change while the order is pending".to_string(),
                ));
            }
            Order::update_shipping_address_tx(&mut tx, id, address).await?;
        }

        if let Some(next) = next_status {
            if !order.status.can_transition_to(next) {
                return Err(AppError::Validation(format!(
                    "illegal status transition from {} to {}",
                    order.status, next
                )));
            }

            if next == OrderStatus::Cancelled && order.status.holds_stock() {
                let items = OrderItem::find_by_order_tx(&mut tx, id).await?;
                for item in &items {
                    Product::restock_tx(&mut tx, item.product_id, item.quantity).await?;
                }
                debug!("Restocked {} line(s) for cancelled order {}", items.len(), id);
            }

            Order::update_status_tx(&mut tx, id, next).await?;
            info!("Order {} moved from {} to {}", id, order.status, next);
        }

        tx.commit().await?;

        self.get_order(id).await
    }

    /// Administrative erase; cascade removes the items. Does not restock,
    /// unlike cancellation.
    pub async fn delete_order(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = Order::delete(&self.db_pool, id).await?;

        if !deleted {
            return Err(AppError::NotFound(format!("order {} not found", id)));
        }

        info!("Deleted order {}", id);

        Ok(())
    }
}
