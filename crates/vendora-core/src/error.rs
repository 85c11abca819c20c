//! # Error Types
//!
//! Domain-specific error types for vendora-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vendora-core errors (this file)                                       │
//! │  ├── CoreError        - Composer / domain failures                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  vendora-api errors (separate crate)                                   │
//! │  └── ApiClientError   - Remote API failures (passed through verbatim)  │
//! │                                                                         │
//! │  vendora-admin errors (app)                                            │
//! │  └── AppError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → Operator               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A submission of this pending sale is already awaiting the API.
    ///
    /// ## When This Occurs
    /// ```text
    /// submit ──► begin_submission ──► (awaiting POST /sales)
    ///                                      │
    /// submit again ────────────────────────┘──► SubmissionInProgress
    /// ```
    #[error("A submission is already in progress")]
    SubmissionInProgress,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before anything is sent to the remote API.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A sale cannot be submitted without line items.
    #[error("at least one item required")]
    EmptySale,
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
