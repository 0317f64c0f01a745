use crate::error::AppError;
use crate::models::Product;
use sqlx::PgPool;
use storefront_shared::{LowStockRow, MonthlyRevenueRow, ProductRevenueRow, TopSpenderRow};

/// Read-only reporting catalog. Every query is a pure function of the
/// current table contents; cancelled orders are excluded from revenue.
/// Ranking queries carry a secondary `id` sort so ties resolve the same
/// way on every run.
#[derive(Clone)]
pub struct ReportService {
    db_pool: PgPool,
}

impl ReportService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Users ranked by lifetime spend across non-cancelled orders.
    pub async fn top_spenders(&self, limit: i64) -> Result<Vec<TopSpenderRow>, AppError> {
        let rows = sqlx::query_as::<_, TopSpenderRow>(
            r#"
            SELECT u.id AS user_id,
                   u.username,
                   COUNT(o.id) AS order_count,
                   SUM(o.total_price) AS total_spent
            FROM users u
            JOIN orders o ON o.user_id = u.id
            WHERE o.status <> 'cancelled'
            GROUP BY u.id, u.username
            ORDER BY total_spent DESC, u.id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(rows)
    }

    /// Products ranked by revenue (quantity x snapshot price).
    pub async fn product_revenue(&self, limit: i64) -> Result<Vec<ProductRevenueRow>, AppError> {
        let rows = sqlx::query_as::<_, ProductRevenueRow>(
            r#"
            SELECT p.id AS product_id,
                   p.name,
                   p.category,
                   SUM(oi.quantity) AS units_sold,
                   SUM(oi.quantity * oi.unit_price) AS revenue,
                   RANK() OVER (ORDER BY SUM(oi.quantity * oi.unit_price) DESC) AS revenue_rank
            FROM products p
            JOIN order_items oi ON oi.product_id = p.id
            JOIN orders o ON o.id = oi.order_id
            WHERE o.status <> 'cancelled'
            GROUP BY p.id, p.name, p.category
            ORDER BY revenue DESC, p.id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(rows)
    }

    /// Revenue per calendar month with month-over-month growth. Growth is
    /// NULL for the first bucket and after zero-revenue months.
    pub async fn monthly_revenue(&self) -> Result<Vec<MonthlyRevenueRow>, AppError> {
        let rows = sqlx::query_as::<_, MonthlyRevenueRow>(
            r#"
            WITH monthly AS (
                SELECT date_trunc('month', o.order_date) AS month,
                       SUM(o.total_price) AS revenue,
                       COUNT(*) AS order_count
                FROM orders o
                WHERE o.status <> 'cancelled'
                GROUP BY 1
            )
            SELECT month,
                   revenue,
                   order_count,
                   ROUND(
                       100 * (revenue - LAG(revenue) OVER (ORDER BY month))
                           / NULLIF(LAG(revenue) OVER (ORDER BY month), 0),
                       2
                   ) AS growth_pct
            FROM monthly
            ORDER BY month ASC
            "#,
        )
        .fetch_all(&self.db_pool)
        .await?;

        Ok(rows)
    }

    /// Products at or below the stock threshold, most depleted first.
    pub async fn low_stock(&self, threshold: i32) -> Result<Vec<LowStockRow>, AppError> {
        Product::low_stock(&self.db_pool, threshold).await
    }
}
