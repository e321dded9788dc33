//! JWT Token Handler
//! Mission: Generate and validate JWT tokens securely

use crate::auth::models::{Account, Claims};
use crate::config::SigningSecret;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;
use tracing::debug;

/// Tokens are valid for one hour after issue
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Why a presented token was not accepted
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("malformed token or bad signature")]
    Invalid,
}

/// JWT Handler for token operations
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Generate a JWT token for an account
    pub fn generate_token(&self, account: &Account) -> Result<String> {
        self.generate_token_at(account, Utc::now())
    }

    fn generate_token_at(&self, account: &Account, issued_at: DateTime<Utc>) -> Result<String> {
        let expiration = issued_at
            .checked_add_signed(Duration::seconds(TOKEN_TTL_SECS))
            .context("Invalid timestamp")?;

        let claims = Claims {
            id: account.id,
            username: account.username.clone(),
            iat: issued_at.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        debug!(
            "Generating JWT for user {} ({}), expires at {}",
            account.username, account.id, expiration
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("Failed to generate JWT")
    }

    /// Validate a JWT token and extract claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_account() -> Account {
        Account {
            id: 42,
            username: "testuser".to_string(),
            password_digest: "hash".to_string(),
            full_name: None,
            profile_picture_url: None,
        }
    }

    fn handler(secret: &str) -> JwtHandler {
        JwtHandler::new(&SigningSecret::new(secret))
    }

    #[test]
    fn test_jwt_generation_and_validation() {
        let handler = handler("test-secret-key-12345");
        let account = create_test_account();

        let token = handler.generate_token(&account).unwrap();
        assert!(!token.is_empty());

        let claims = handler.validate_token(&token).unwrap();
        assert_eq!(claims.id, 42);
        assert_eq!(claims.username, "testuser");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS as usize);
        assert!(claims.exp > Utc::now().timestamp() as usize);
    }

    #[test]
    fn test_expired_token_reported_as_expired() {
        let handler = handler("test-secret-key-12345");
        let issued_at = Utc::now() - Duration::seconds(TOKEN_TTL_SECS + 5);

        let token = handler
            .generate_token_at(&create_test_account(), issued_at)
            .unwrap();

        assert_eq!(handler.validate_token(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_token_just_inside_window_is_valid() {
        let handler = handler("test-secret-key-12345");
        let issued_at = Utc::now() - Duration::seconds(TOKEN_TTL_SECS - 60);

        let token = handler
            .generate_token_at(&create_test_account(), issued_at)
            .unwrap();

        assert!(handler.validate_token(&token).is_ok());
    }

    #[test]
    fn test_invalid_token_rejected() {
        let handler = handler("test-secret-key-12345");

        assert_eq!(
            handler.validate_token("invalid.token.here"),
            Err(TokenError::Invalid)
        );
        assert_eq!(handler.validate_token(""), Err(TokenError::Invalid));
        assert_eq!(handler.validate_token("garbage"), Err(TokenError::Invalid));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let handler = handler("test-secret-key-12345");
        let token = handler.generate_token(&create_test_account()).unwrap();

        let sig_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        bytes[sig_start] = if bytes[sig_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert_eq!(handler.validate_token(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn test_different_secrets_reject() {
        let handler1 = handler("secret1");
        let handler2 = handler("secret2");

        let token = handler1.generate_token(&create_test_account()).unwrap();

        assert_eq!(handler2.validate_token(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_insecure_default_secret_still_signs() {
        let secret = SigningSecret::from_env_value(None);
        assert!(secret.is_insecure_default());

        let handler = JwtHandler::new(&secret);
        let token = handler.generate_token(&create_test_account()).unwrap();
        assert!(handler.validate_token(&token).is_ok());
    }
}
