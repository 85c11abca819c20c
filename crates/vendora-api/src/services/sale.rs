//! # Sale Service
//!
//! Sales history, creation and cancellation.
//!
//! A created sale is priced by the API from its current product records;
//! the composer's own total is only a confirmation hint.

use async_trait::async_trait;
use tracing::info;
use vendora_core::{Sale, SaleSubmission, ValidationError};

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::services::SalesApi;

const ENTITY: &str = "Sale";

#[derive(Debug, Clone)]
pub struct SaleService {
    client: ApiClient,
}

impl SaleService {
    pub(crate) fn new(client: ApiClient) -> Self {
        SaleService { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<Sale>> {
        self.client.get("/sales", None).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Sale> {
        self.client
            .get(&format!("/sales/{}", id), Some((ENTITY, id)))
            .await
    }

    /// `POST /sales`. An empty submission is refused locally.
    pub async fn create(&self, submission: &SaleSubmission) -> ApiResult<Sale> {
        if submission.items.is_empty() {
            return Err(ValidationError::EmptySale.into());
        }

        let sale: Sale = self.client.post("/sales", submission).await?;
        info!(sale_id = %sale.id, total = %sale.total, items = sale.items.len(), "Sale created");
        Ok(sale)
    }

    /// `DELETE /sales/{id}`: the API marks the sale canceled.
    pub async fn cancel(&self, id: &str) -> ApiResult<()> {
        self.client
            .delete(&format!("/sales/{}", id), Some((ENTITY, id)))
            .await?;
        info!(sale_id = %id, "Sale canceled");
        Ok(())
    }
}

#[async_trait]
impl SalesApi for SaleService {
    async fn create_sale(&self, submission: &SaleSubmission) -> ApiResult<Sale> {
        self.create(submission).await
    }
}
