//! Page/limit parsing for paginated listings

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 5;

/// Raw `?page=&limit=` query, kept as text until validated
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn parse_bounded(name: &str, raw: Option<&str>, default: i64, min: i64) -> Result<i64, ApiError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(default),
        Some(v) => v,
    };

    match raw.parse::<i64>() {
        Ok(v) if v >= min => Ok(v),
        _ => Err(ApiError::BadRequest(format!(
            "{} must be an integer >= {}",
            name, min
        ))),
    }
}

impl PageRequest {
    /// Validate the query. `max_limit`, when set, clamps oversized pages.
    /// `limit=0` is a valid empty page that still reports the total.
    pub fn from_params(params: &PageParams, max_limit: Option<u32>) -> Result<Self, ApiError> {
        let page = parse_bounded("page", params.page.as_deref(), DEFAULT_PAGE, 1)?;
        let mut limit = parse_bounded("limit", params.limit.as_deref(), DEFAULT_LIMIT, 0)?;

        if let Some(max) = max_limit.map(i64::from) {
            if limit > max {
                debug!("Clamping page limit {} to {}", limit, max);
                limit = max;
            }
        }

        let request = Self { page, limit };
        if request.checked_offset().is_none() {
            return Err(ApiError::BadRequest("page is out of range".to_string()));
        }
        Ok(request)
    }

    fn checked_offset(&self) -> Option<i64> {
        (self.page - 1).checked_mul(self.limit)
    }

    /// `(page - 1) * limit`
    pub fn offset(&self) -> i64 {
        self.checked_offset().unwrap_or(i64::MAX)
    }
}

/// Paginated listing body
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: i64,
}
