//! # App Error Type
//!
//! Unified error type for console commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Vendora Admin                          │
//! │                                                                         │
//! │  Console                     Command                                    │
//! │  ───────                     ───────                                    │
//! │                                                                         │
//! │  > submit C1                                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Empty sale? ──── ValidationError::EmptySale ──┐                │  │
//! │  │         │                                      │                │  │
//! │  │         ▼                                      ▼                │  │
//! │  │  API said no? ─── ApiClientError::Rejected ── AppError ────────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  error [VALIDATION_ERROR]: at least one item required                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Server messages are passed through unchanged.

use serde::Serialize;
use vendora_api::ApiClientError;
use vendora_core::{CoreError, ValidationError};

/// Error returned from app commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "REJECTED",
///   "message": "Product P3 is inactive"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Local input validation failed
    ValidationError,

    /// Not signed in, or the token was refused
    Unauthorized,

    /// The API refused the payload (400/422)
    Rejected,

    /// The API failed (other statuses, undecodable bodies)
    ServerError,

    /// The API could not be reached
    Network,

    /// A submission is already in flight
    SubmissionInProgress,

    /// No sale is being composed
    NoOpenSale,

    /// Local failure (config, files)
    Internal,
}

impl ErrorCode {
    /// Wire name, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Rejected => "REJECTED",
            ErrorCode::ServerError => "SERVER_ERROR",
            ErrorCode::Network => "NETWORK",
            ErrorCode::SubmissionInProgress => "SUBMISSION_IN_PROGRESS",
            ErrorCode::NoOpenSale => "NO_OPEN_SALE",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Result type for app commands.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn no_open_sale() -> Self {
        AppError::new(ErrorCode::NoOpenSale, "No sale open. Run `open` first.")
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::SubmissionInProgress => {
                AppError::new(ErrorCode::SubmissionInProgress, err.to_string())
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

/// Converts API client errors to app errors, keeping server messages verbatim.
impl From<ApiClientError> for AppError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::NotFound { entity, id } => AppError::not_found(&entity, &id),
            ApiClientError::Unauthorized(message) => AppError::new(
                ErrorCode::Unauthorized,
                format!("{} (run `login`)", message),
            ),
            ApiClientError::Rejected(message) => AppError::new(ErrorCode::Rejected, message),
            ApiClientError::Validation(e) => e.into(),
            ApiClientError::Network(_) => AppError::new(ErrorCode::Network, err.to_string()),
            ApiClientError::Server { .. } | ApiClientError::Decode(_) => {
                AppError::new(ErrorCode::ServerError, err.to_string())
            }
            ApiClientError::InvalidConfig(_) | ApiClientError::Token(_) | ApiClientError::Io(_) => {
                tracing::error!("Local failure: {}", err);
                AppError::new(ErrorCode::Internal, err.to_string())
            }
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("Console I/O failure: {}", err);
        AppError::new(ErrorCode::Internal, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {}
