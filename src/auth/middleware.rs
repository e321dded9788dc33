//! Authentication Middleware
//! Mission: Protect API endpoints with JWT validation

use crate::auth::jwt::{JwtHandler, TokenError};
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Auth middleware that validates JWT tokens
pub async fn auth_middleware(
    State(jwt_handler): State<Arc<JwtHandler>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingHeader)?;

    // "<scheme> <token>"; the scheme itself is not checked
    let token = header
        .split_whitespace()
        .nth(1)
        .ok_or(AuthError::MissingToken)?;

    let claims = jwt_handler
        .validate_token(token)
        .map_err(AuthError::InvalidToken)?;

    // Handlers read the verified identity from extensions
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Auth error types
#[derive(Debug)]
pub enum AuthError {
    MissingHeader,
    MissingToken,
    InvalidToken(TokenError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthError::MissingHeader | AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Access denied: no token provided",
            ),
            AuthError::InvalidToken(_) => (StatusCode::FORBIDDEN, "Invalid token"),
        };

        match &self {
            AuthError::MissingHeader => debug!("Rejected request: no Authorization header"),
            AuthError::MissingToken => debug!("Rejected request: no token after scheme"),
            AuthError::InvalidToken(reason) => debug!("Rejected request: {}", reason),
        }

        (status, Json(json!({ "message": message }))).into_response()
    }
}
