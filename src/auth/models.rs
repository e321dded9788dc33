//! Authentication Models
//! Mission: Account, token claims and the auth request/response bodies

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored account. The digest never leaves the process.
#[derive(Clone)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub password_digest: String,
    pub full_name: Option<String>,
    pub profile_picture_url: Option<String>,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("full_name", &self.full_name)
            .field("profile_picture_url", &self.profile_picture_url)
            .finish_non_exhaustive()
    }
}

/// Row to insert at registration, password already hashed
#[derive(Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_digest: String,
    pub full_name: Option<String>,
    pub profile_picture_url: Option<String>,
}

/// JWT claims payload; also the verified identity handed to handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub username: String,
    pub iat: usize, // issued-at timestamp
    pub exp: usize, // expiration timestamp
}

/// Login request body
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub username: String,
    pub full_name: Option<String>,
    pub profile_picture: Option<String>,
}

/// Registration request body
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("full_name", &self.full_name)
            .field("profile_picture_url", &self.profile_picture_url)
            .finish_non_exhaustive()
    }
}

/// Profile response (sanitized)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailsResponse {
    pub username: String,
    pub full_name: Option<String>,
    pub profile_picture: Option<String>,
}

impl UserDetailsResponse {
    pub fn from_account(account: &Account) -> Self {
        Self {
            username: account.username.clone(),
            full_name: account.full_name.clone(),
            profile_picture: account.profile_picture_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_account() -> Account {
        Account {
            id: 7,
            username: "alice".to_string(),
            password_digest: "$2b$10$abcdefghijklmnopqrstuv".to_string(),
            full_name: Some("Alice A".to_string()),
            profile_picture_url: None,
        }
    }

    #[test]
    fn test_user_details_uses_wire_names() {
        let details = UserDetailsResponse::from_account(&create_test_account());
        let json = serde_json::to_value(&details).unwrap();

        assert_eq!(json["username"], "alice");
        assert_eq!(json["fullName"], "Alice A");
        assert!(json["profilePicture"].is_null());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_debug_output_omits_secrets() {
        let account = create_test_account();
        assert!(!format!("{:?}", account).contains("$2b$"));

        let login: LoginRequest =
            serde_json::from_str(r#"{"username":"alice","password":"pw1"}"#).unwrap();
        assert!(!format!("{:?}", login).contains("pw1"));
    }

    #[test]
    fn test_register_optional_fields_default_to_none() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"username":"bob","password":"pw"}"#).unwrap();
        assert!(req.full_name.is_none());
        assert!(req.profile_picture_url.is_none());
    }
}
