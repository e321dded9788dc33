//! KlikBelanja Backend Library
//!
//! Token-authenticated CRUD API over student and product records.
//! Exposes the router and its building blocks for the binary and tests.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod resources;

pub use api::{create_router, AppContext};
pub use config::Config;
pub use db::Database;
