//! Storefront backend: a CRUD REST API over a relational e-commerce
//! schema (users, products, orders, order items) plus a read-only
//! reporting catalog. All invariants that span rows are enforced either
//! declaratively by the schema or inside single transactions.

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
