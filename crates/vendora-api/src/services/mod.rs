//! # Resource Services
//!
//! One service per REST resource, obtained from [`ApiClient`](crate::ApiClient)
//! accessors (`client.products()`, `client.sales()`, ...).
//!
//! ## Endpoints
//! | Service    | Paths                                                      |
//! |------------|------------------------------------------------------------|
//! | auth       | `POST /auth/login`, `POST /auth/register`                  |
//! | products   | `/products`, `/products/{id}`, `/products/restore/{id}`    |
//! | categories | `/categories`, `/categories/{id}`, `/categories/restore/{id}` |
//! | clients    | `/clients`, `/clients/{id}`, `/clients/restore/{id}`       |
//! | users      | `/users`, `/users/{id}`                                    |
//! | sales      | `/sales`, `/sales/{id}`                                    |
//!
//! The composer's two collaborators are expressed as traits so the app
//! can swap in fakes: [`ProductCatalogProvider`] and [`SalesApi`].

use async_trait::async_trait;
use vendora_core::{Product, Sale, SaleSubmission};

use crate::error::ApiResult;

mod auth;
mod category;
mod client;
mod product;
mod sale;
mod user;

pub use auth::AuthService;
pub use category::CategoryService;
pub use client::ClientService;
pub use product::ProductService;
pub use sale::SaleService;
pub use user::UserService;

// =============================================================================
// Collaborator Traits
// =============================================================================

/// Supplies the product list a sale composer is opened against.
#[async_trait]
pub trait ProductCatalogProvider: Send + Sync {
    /// All products, active and inactive.
    async fn list_products(&self) -> ApiResult<Vec<Product>>;
}

/// Accepts finished sales.
#[async_trait]
pub trait SalesApi: Send + Sync {
    /// Persists a sale; the API resolves unit prices and the total.
    async fn create_sale(&self, submission: &SaleSubmission) -> ApiResult<Sale>;
}
