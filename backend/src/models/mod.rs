//! Database models for the storefront backend.
//!
//! Each model corresponds to a table and provides type-safe CRUD
//! operations using sqlx. Multi-row invariants (order placement, stock
//! movement) are coordinated by the service layer inside transactions;
//! the models expose the transaction-scoped building blocks.

pub mod order;
pub mod product;
pub mod user;

pub use order::{Order, OrderItem};
pub use product::Product;
pub use user::User;

use storefront_shared::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Pagination helper clamping caller-supplied bounds.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_clamps_out_of_range_values() {
        let p = Pagination::new(Some(10_000), Some(-5));
        assert_eq!(p.limit, MAX_PAGE_SIZE);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn pagination_defaults() {
        let p = Pagination::new(None, None);
        assert_eq!(p.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(p.offset, 0);
    }
}
