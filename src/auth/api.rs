//! Authentication API Endpoints
//! Mission: Provide login, registration and profile endpoints

use crate::auth::{
    jwt::JwtHandler,
    models::{
        Claims, LoginRequest, LoginResponse, NewAccount, RegisterRequest, UserDetailsResponse,
    },
    password::PasswordHasher,
    user_store::UserStore,
};
use crate::error::{Ack, ApiBody, ApiError, INTERNAL_ERROR_MESSAGE};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub user_store: UserStore,
    pub jwt_handler: Arc<JwtHandler>,
    pub hasher: PasswordHasher,
}

impl AuthState {
    pub fn new(user_store: UserStore, jwt_handler: Arc<JwtHandler>, hasher: PasswordHasher) -> Self {
        Self {
            user_store,
            jwt_handler,
            hasher,
        }
    }
}

/// Login endpoint - POST /loginuser
pub async fn login(
    State(state): State<AuthState>,
    ApiBody(payload): ApiBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthApiError> {
    info!("🔐 Login attempt: {}", payload.username);

    let account = state
        .user_store
        .get_user_by_username(&payload.username)
        .await
        .map_err(AuthApiError::Internal)?;

    let Some(account) = account else {
        warn!("❌ Failed login attempt (unknown user): {}", payload.username);
        return Err(AuthApiError::InvalidCredentials);
    };

    let valid = state
        .hasher
        .verify_blocking(payload.password, account.password_digest.clone())
        .await
        .map_err(AuthApiError::Internal)?;

    if !valid {
        warn!("❌ Failed login attempt: {}", payload.username);
        return Err(AuthApiError::InvalidCredentials);
    }

    let token = state
        .jwt_handler
        .generate_token(&account)
        .map_err(AuthApiError::Internal)?;

    info!("✅ Login successful: {} ({})", account.username, account.id);

    Ok(Json(LoginResponse {
        success: true,
        token,
        username: account.username,
        full_name: account.full_name,
        profile_picture: account.profile_picture_url,
    }))
}

/// Register endpoint - POST /register
pub async fn register(
    State(state): State<AuthState>,
    ApiBody(payload): ApiBody<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let password_digest = state.hasher.hash_blocking(payload.password).await?;

    state
        .user_store
        .create_user(&NewAccount {
            username: payload.username,
            password_digest,
            full_name: payload.full_name,
            profile_picture_url: payload.profile_picture_url,
        })
        .await?;

    Ok((StatusCode::CREATED, Ack::new("User registered successfully")))
}

/// Profile of the authenticated caller - GET /userdetails
pub async fn user_details(
    State(state): State<AuthState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserDetailsResponse>, ApiError> {
    let account = state
        .user_store
        .get_user_by_id(claims.id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    Ok(Json(UserDetailsResponse::from_account(&account)))
}

/// Login errors carry `success: false` alongside the message
#[derive(Debug)]
pub enum AuthApiError {
    InvalidCredentials,
    Internal(anyhow::Error),
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid username or password")
            }
            AuthApiError::Internal(err) => {
                error!("Login failed: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        };

        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_api_error_responses() {
        let invalid_creds = AuthApiError::InvalidCredentials.into_response();
        assert_eq!(invalid_creds.status(), StatusCode::UNAUTHORIZED);

        let internal = AuthApiError::Internal(anyhow::anyhow!("db down")).into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
