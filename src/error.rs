//! API Errors
//!
//! Everything a backend call can fail with. Authentication failures have
//! already been handled centrally by the time a caller sees them.

use thiserror::Error;

/// Shown when the backend gives no usable detail
pub const GENERIC_MESSAGE: &str = "An error occurred";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 401; credential already cleared and login navigation triggered
    #[error("not authenticated")]
    Unauthorized { detail: Option<String> },
    /// Any other non-2xx response
    #[error("request failed with status {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("invalid request body: {0}")]
    Encode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Build the error for a failed response from its status and raw body
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        if status == 401 {
            ApiError::Unauthorized { detail }
        } else {
            ApiError::Status { status, detail }
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail } | ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Short message suitable for showing next to a form
    pub fn user_message(&self) -> String {
        self.detail().unwrap_or(GENERIC_MESSAGE).to_string()
    }
}

/// Pull a string `detail` out of a JSON error body.
/// Structured details (e.g. validation error lists) are ignored.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(str::to_string)
}
