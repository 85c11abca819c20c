//! # Product Service
//!
//! Product CRUD. Create and update are sent as `multipart/form-data` so an
//! image can travel with the fields:
//!
//! ```text
//! name        = "Coffee"
//! price       = "10.50"
//! categoryId  = "C1"
//! description = "..."          (only when present)
//! file        = <image bytes>  (only when present)
//! ```

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use tracing::debug;
use vendora_core::dto::{CreateProductDto, ImageUpload, UpdateProductDto};
use vendora_core::validation::{validate_catalog_name, validate_create_product, validate_price};
use vendora_core::Product;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::services::ProductCatalogProvider;

const ENTITY: &str = "Product";

#[derive(Debug, Clone)]
pub struct ProductService {
    client: ApiClient,
}

impl ProductService {
    pub(crate) fn new(client: ApiClient) -> Self {
        ProductService { client }
    }

    /// `GET /products`, active and inactive.
    pub async fn list(&self) -> ApiResult<Vec<Product>> {
        self.client.get("/products", None).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Product> {
        self.client
            .get(&format!("/products/{}", id), Some((ENTITY, id)))
            .await
    }

    pub async fn create(&self, dto: CreateProductDto) -> ApiResult<Product> {
        validate_create_product(&dto)?;

        let mut form = Form::new()
            .text("name", dto.name)
            .text("price", dto.price.amount().to_string())
            .text("categoryId", dto.category_id);
        if let Some(description) = dto.description {
            form = form.text("description", description);
        }
        if let Some(image) = dto.image {
            form = form.part("file", image_part(image)?);
        }

        let builder = self.client.request(Method::POST, "/products").multipart(form);
        self.client.send_json(builder, None).await
    }

    /// Sends only the fields that are set.
    pub async fn update(&self, id: &str, dto: UpdateProductDto) -> ApiResult<Product> {
        let mut form = Form::new();
        if let Some(name) = dto.name {
            validate_catalog_name(&name)?;
            form = form.text("name", name);
        }
        if let Some(price) = dto.price {
            validate_price(price)?;
            form = form.text("price", price.amount().to_string());
        }
        if let Some(category_id) = dto.category_id {
            form = form.text("categoryId", category_id);
        }
        if let Some(description) = dto.description {
            form = form.text("description", description);
        }
        if let Some(image) = dto.image {
            form = form.part("file", image_part(image)?);
        }

        let builder = self
            .client
            .request(Method::PATCH, &format!("/products/{}", id))
            .multipart(form);
        self.client.send_json(builder, Some((ENTITY, id))).await
    }

    /// Soft delete.
    pub async fn remove(&self, id: &str) -> ApiResult<()> {
        self.client
            .delete(&format!("/products/{}", id), Some((ENTITY, id)))
            .await
    }

    pub async fn restore(&self, id: &str) -> ApiResult<()> {
        let builder = self
            .client
            .request(Method::PATCH, &format!("/products/restore/{}", id));
        self.client.send_empty(builder, Some((ENTITY, id))).await
    }
}

fn image_part(image: ImageUpload) -> ApiResult<Part> {
    debug!(file = %image.file_name, bytes = image.bytes.len(), "Attaching product image");
    Ok(Part::bytes(image.bytes)
        .file_name(image.file_name)
        .mime_str(&image.content_type)?)
}

#[async_trait]
impl ProductCatalogProvider for ProductService {
    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        self.list().await
    }
}
