//! Authentication Module
//! Mission: Password digests, bearer tokens and the gate in front of protected routes

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod user_store;

pub use api::AuthState;
pub use jwt::{JwtHandler, TokenError};
pub use middleware::auth_middleware;
pub use models::Claims;
pub use password::PasswordHasher;
pub use user_store::UserStore;
