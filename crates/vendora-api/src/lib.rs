//! # vendora-api: REST Client for Vendora
//!
//! Everything that leaves the machine goes through this crate.
//!
//! ## Modules
//! - [`client`] - `ApiClient`: reqwest wrapper, bearer auth, error mapping
//! - [`services`] - One service per resource, plus the composer's
//!   collaborator traits ([`ProductCatalogProvider`], [`SalesApi`])
//! - [`token`] - `TokenStore`: session token, persistence, claims
//! - [`config`] - `ApiConfig`: defaults → `vendora.toml` → `VENDORA_*` env
//! - [`error`] - `ApiClientError`
//!
//! ## Example
//! ```rust,no_run
//! use vendora_api::{ApiClient, ApiConfig};
//!
//! # async fn run() -> vendora_api::ApiResult<()> {
//! let config = ApiConfig::load(None)?;
//! let client = ApiClient::new(&config)?;
//!
//! client.auth().login("ana@shop.test", "secret123").await?;
//! let products = client.products().list().await?;
//! println!("{} products", products.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod services;
pub mod token;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::{ApiClientError, ApiResult};
pub use services::{ProductCatalogProvider, SalesApi};
pub use token::TokenStore;
