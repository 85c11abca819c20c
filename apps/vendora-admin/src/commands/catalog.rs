//! Read-only lookups used while composing a sale.

use tracing::debug;
use vendora_api::{ApiClient, ProductCatalogProvider};
use vendora_core::{Client, Product};

use crate::error::AppResult;

/// Products as the API lists them, inactive ones included.
pub async fn list_products(provider: &dyn ProductCatalogProvider) -> AppResult<Vec<Product>> {
    debug!("list_products command");
    Ok(provider.list_products().await?)
}

/// Active clients, for picking the client of a sale.
pub async fn list_clients(api: &ApiClient) -> AppResult<Vec<Client>> {
    debug!("list_clients command");
    let clients = api.clients().list().await?;
    Ok(clients.into_iter().filter(|c| c.is_active).collect())
}
