//! # vendora-core: Pure Business Logic for Vendora
//!
//! This crate holds the domain model of the Vendora admin client and the
//! sale composer. It performs no I/O: the API crate fetches and submits,
//! the app crate owns state and logging.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vendora Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 vendora-admin (operator console)                │   │
//! │  │    login ──► open ──► add / rm / inc / dec ──► submit           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vendora-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ composer  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  Pending  │  │   rules   │  │   │
//! │  │   │   Sale    │  │ (Decimal) │  │  Catalog  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO LOGGING • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                vendora-api (REST client)                        │   │
//! │  │        products, categories, clients, users, sales, auth        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities returned by the API (Product, Sale, Client, ...)
//! - [`dto`] - Request payloads, including [`SaleSubmission`]
//! - [`money`] - Decimal-backed money, rounded only for display
//! - [`catalog`] - Active-product snapshot
//! - [`pending`] - Line items of the sale being composed
//! - [`composer`] - The composer state machine (staging, submission lock)
//! - [`error`] - Domain error types
//! - [`validation`] - Payload validation
//!
//! ## Example Usage
//!
//! ```rust
//! use vendora_core::composer::SaleComposer;
//! use vendora_core::{Money, Product};
//!
//! let product: Product = serde_json::from_value(serde_json::json!({
//!     "id": "P1", "name": "Coffee", "price": 10.0,
//!     "categoryId": "C1", "isActive": true
//! })).unwrap();
//!
//! let mut composer = SaleComposer::open(vec![product]);
//! composer.add_item("P1", 2);
//! composer.add_item("P1", 1);
//!
//! assert_eq!(composer.total(), Money::from_cents(3000));
//! assert_eq!(composer.pending().quantity_of("P1"), Some(3));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod composer;
pub mod dto;
pub mod error;
pub mod money;
pub mod pending;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use composer::{ComposerStatus, ComposerSummary, SaleComposer, Settlement, SubmissionTicket};
pub use dto::SaleSubmission;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pending::{EditOutcome, PendingSale, Rejection};
pub use types::*;
