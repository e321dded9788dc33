//! API Error Types
//!
//! Every failure leaves the service as JSON with a `message` field.
//! Internal errors are logged with full context and answered with a generic body.

use axum::{
    async_trait,
    extract::{
        rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Request,
    },
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Body, path or query could not be turned into the typed request (400)
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Read of a record that does not exist (404)
    #[error("not found: {0}")]
    NotFound(&'static str),

    /// Store, hashing or signing failure (500)
    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            ApiError::Internal(err) => {
                error!("Request failed: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Request body accepted as JSON or as an urlencoded HTML form.
/// Anything that is not declared as a form goes through the JSON path.
pub struct ApiBody<T>(pub T);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| {
            ct.trim_start()
                .to_ascii_lowercase()
                .starts_with("application/x-www-form-urlencoded")
        })
        .unwrap_or(false)
}

#[async_trait]
impl<T, S> FromRequest<S> for ApiBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            Ok(Self(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state).await?;
            Ok(Self(value))
        }
    }
}

/// `Path` extractor whose rejections render as `ApiError`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// `Query` extractor whose rejections render as `ApiError`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// `{"message": ...}` success acknowledgement
#[derive(Debug, Serialize)]
pub struct Ack {
    pub message: &'static str,
}

impl Ack {
    pub fn new(message: &'static str) -> Json<Self> {
        Json(Self { message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        name: String,
        qty: i64,
    }

    fn body_request(content_type: &str, body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let err = ApiError::Internal(anyhow::anyhow!("UNIQUE constraint failed: users.username"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_client_errors_carry_message() {
        let response = ApiError::NotFound("Product not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "Product not found");

        let response = ApiError::BadRequest("page must be a positive integer".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            "page must be a positive integer"
        );
    }

    #[tokio::test]
    async fn test_body_accepts_json_and_form() {
        let expected = Item {
            name: "Teh Manis".to_string(),
            qty: 3,
        };

        let req = body_request("application/json", r#"{"name":"Teh Manis","qty":3}"#);
        let ApiBody(item) = ApiBody::<Item>::from_request(req, &()).await.unwrap();
        assert_eq!(item, expected);

        let req = body_request(
            "application/x-www-form-urlencoded; charset=UTF-8",
            "name=Teh+Manis&qty=3",
        );
        let ApiBody(item) = ApiBody::<Item>::from_request(req, &()).await.unwrap();
        assert_eq!(item, expected);
    }

    #[tokio::test]
    async fn test_body_rejections_are_bad_requests() {
        let req = body_request("application/x-www-form-urlencoded", "name=Teh&qty=lots");
        let err = ApiBody::<Item>::from_request(req, &()).await.err().unwrap();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let req = body_request("text/plain", "name=Teh&qty=3");
        let err = ApiBody::<Item>::from_request(req, &()).await.err().unwrap();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
