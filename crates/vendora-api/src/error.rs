//! # API Client Error Types
//!
//! Error types for calls to the remote REST API.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       API Error Categories                              │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  HTTP status    │  │   Transport     │  │     Local               │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  401 Unauthorized│ │  Network        │  │  InvalidConfig          │ │
//! │  │  404 NotFound   │  │  Decode         │  │  Validation, Token      │ │
//! │  │  400/422 Rejected│ │                 │  │  Io                     │ │
//! │  │  other  Server  │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Server messages are kept verbatim; array messages (field validation
//! failures) are joined with `", "`.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use vendora_core::ValidationError;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiClientError>;

/// Everything that can go wrong talking to the API.
#[derive(Debug, Error)]
pub enum ApiClientError {
    // =========================================================================
    // HTTP Status Errors
    // =========================================================================
    /// 404 for a specific resource.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// 401: missing, expired or rejected token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 400 / 422: the API refused the payload.
    #[error("{0}")]
    Rejected(String),

    /// Any other non-success status.
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    // =========================================================================
    // Transport Errors
    // =========================================================================
    #[error("Network error: {0}")]
    Network(String),

    /// Response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    // =========================================================================
    // Local Errors
    // =========================================================================
    /// Payload failed local validation; nothing was sent.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid API configuration: {0}")]
    InvalidConfig(String),

    /// Stored bearer token could not be read or decoded.
    #[error("Token error: {0}")]
    Token(String),

    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// Error Body
// =============================================================================

/// The JSON error body the API returns.
///
/// ```json
/// { "statusCode": 400, "message": ["name should not be empty"], "error": "Bad Request" }
/// ```
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<ErrorMessage>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

/// Extracts a readable message from an error body, falling back to the raw text.
pub(crate) fn error_message(body: &str, status: StatusCode) -> String {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();

    let message = parsed.and_then(|b| match b.message {
        Some(ErrorMessage::One(m)) => Some(m),
        Some(ErrorMessage::Many(list)) => Some(list.join(", ")),
        None => b.error,
    });

    match message {
        Some(m) if !m.trim().is_empty() => m,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    }
}

impl ApiClientError {
    /// Maps a non-success status to an error.
    ///
    /// `resource` is `(entity, id)` for single-resource requests, so a 404
    /// becomes [`ApiClientError::NotFound`]. Collection 404s become `Server`.
    pub(crate) fn from_status(status: StatusCode, body: &str, resource: Option<(&str, &str)>) -> Self {
        let message = error_message(body, status);

        match status {
            StatusCode::UNAUTHORIZED => ApiClientError::Unauthorized(message),
            StatusCode::NOT_FOUND => match resource {
                Some((entity, id)) => ApiClientError::NotFound {
                    entity: entity.to_string(),
                    id: id.to_string(),
                },
                None => ApiClientError::Server {
                    status: status.as_u16(),
                    message,
                },
            },
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiClientError::Rejected(message)
            }
            _ => ApiClientError::Server {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// True when the operator must sign in again.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiClientError::Unauthorized(_))
    }

    /// True when the request never got an answer.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiClientError::Network(_))
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for ApiClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiClientError::Decode(err.to_string())
        } else {
            ApiClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiClientError {
    fn from(err: serde_json::Error) -> Self {
        ApiClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ApiClientError {
    fn from(err: url::ParseError) -> Self {
        ApiClientError::InvalidConfig(err.to_string())
    }
}

impl From<std::io::Error> for ApiClientError {
    fn from(err: std::io::Error) -> Self {
        ApiClientError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ApiClientError {
    fn from(err: toml::de::Error) -> Self {
        ApiClientError::InvalidConfig(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ApiClientError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        ApiClientError::Token(err.to_string())
    }
}
