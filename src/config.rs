//! Runtime Configuration
//! Mission: Collect listener, store and signing settings from flags / environment

use crate::auth::password::DEFAULT_BCRYPT_COST;
use clap::Parser;
use std::fmt;

/// Fallback signing secret used when `SECRET_KEY` is not set.
/// Anything signed with this is forgeable by whoever has read the source.
pub const INSECURE_DEFAULT_SECRET: &str = "dev-secret-change-in-production";

#[derive(Parser, Debug, Clone)]
#[command(name = "klikbelanja")]
#[command(about = "Student & product records API with bearer-token authentication")]
pub struct Config {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Listening port
    #[arg(long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// HMAC secret used to sign bearer tokens
    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// SQLite database file
    #[arg(long, env = "DATABASE_PATH", default_value = "klikbelanja.db")]
    pub database_path: String,

    /// bcrypt work factor for new password digests
    #[arg(long, env = "BCRYPT_COST", default_value_t = DEFAULT_BCRYPT_COST)]
    pub bcrypt_cost: u32,

    /// Upper bound applied to the product page size (unbounded when unset)
    #[arg(long, env = "MAX_PAGE_LIMIT")]
    pub max_page_limit: Option<u32>,

    /// Put product creation behind the auth gate like every other product route
    #[arg(
        long,
        env = "PRODUCT_CREATE_REQUIRES_AUTH",
        action = clap::ArgAction::Set,
        default_value_t = false
    )]
    pub product_create_requires_auth: bool,
}

impl Config {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn signing_secret(&self) -> SigningSecret {
        SigningSecret::from_env_value(self.secret_key.clone())
    }
}

/// Token signing secret, resolved once at startup and handed to the JWT handler.
#[derive(Clone)]
pub struct SigningSecret {
    value: String,
    insecure_default: bool,
}

impl SigningSecret {
    /// Explicit secret supplied by the operator
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            insecure_default: false,
        }
    }

    /// Resolve from an optional configured value; blank counts as absent.
    pub fn from_env_value(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() => Self::new(v),
            _ => Self {
                value: INSECURE_DEFAULT_SECRET.to_string(),
                insecure_default: true,
            },
        }
    }

    pub fn is_insecure_default(&self) -> bool {
        self.insecure_default
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.value.as_bytes()
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningSecret")
            .field("value", &"<redacted>")
            .field("insecure_default", &self.insecure_default)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_secret_falls_back_to_flagged_default() {
        let secret = SigningSecret::from_env_value(None);
        assert!(secret.is_insecure_default());
        assert_eq!(secret.as_bytes(), INSECURE_DEFAULT_SECRET.as_bytes());

        let blank = SigningSecret::from_env_value(Some("   ".to_string()));
        assert!(blank.is_insecure_default());
    }

    #[test]
    fn test_configured_secret_is_not_flagged() {
        let secret = SigningSecret::from_env_value(Some("s3cr3t".to_string()));
        assert!(!secret.is_insecure_default());
        assert_eq!(secret.as_bytes(), b"s3cr3t");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let secret = SigningSecret::new("super-secret-value");
        let rendered = format!("{:?}", secret);
        assert!(!rendered.contains("super-secret-value"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn test_defaults_without_arguments() {
        let config = Config::try_parse_from(["klikbelanja"]).unwrap();

        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(config.port, 5000);
        assert_eq!(config.database_path, "klikbelanja.db");
        assert_eq!(config.max_page_limit, None);
        assert!(!config.product_create_requires_auth);
    }

    #[test]
    fn test_flag_parsing() {
        let config = Config::try_parse_from([
            "klikbelanja",
            "--port",
            "8080",
            "--secret-key",
            "abc",
            "--max-page-limit",
            "50",
            "--product-create-requires-auth",
            "true",
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.listen_addr(), format!("{}:8080", config.host));
        assert_eq!(config.max_page_limit, Some(50));
        assert!(config.product_create_requires_auth);
        assert!(!config.signing_secret().is_insecure_default());
    }
}
