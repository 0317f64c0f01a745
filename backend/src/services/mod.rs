pub mod account_service;
pub mod catalog_service;
pub mod order_service;
pub mod report_service;

pub use account_service::AccountService;
pub use catalog_service::CatalogService;
pub use order_service::OrderService;
pub use report_service::ReportService;
