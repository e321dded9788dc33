//! Middleware for observability.
//!
//! Request logging with latency tracking. The auth gate lives in
//! `auth::middleware` next to the token handler it depends on.

pub mod logging;

pub use logging::request_logging;
