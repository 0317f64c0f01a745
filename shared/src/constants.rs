use rust_decimal::Decimal;

// Pagination defaults
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

// User constraints
pub const USERNAME_PATTERN: &str = r"^[a-zA-Z0-9_-]{3,50}$";
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_EMAIL_LENGTH: usize = 254;

// Product constraints
pub const MAX_PRODUCT_NAME_LENGTH: usize = 255;
pub const MAX_DESCRIPTION_LENGTH: usize = 5000;
pub const MAX_CATEGORY_LENGTH: usize = 100;
pub const MIN_PRODUCT_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2); // 0.01

// Order constraints
pub const MAX_ITEMS_PER_ORDER: usize = 100;
pub const MAX_SHIPPING_ADDRESS_LENGTH: usize = 500;

// Reporting defaults
pub const DEFAULT_REPORT_LIMIT: i64 = 10;
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 5;
