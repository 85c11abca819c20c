use reqwest::Method;
use vendora_core::dto::{CreateCategoryDto, UpdateCategoryDto};
use vendora_core::validation::validate_catalog_name;
use vendora_core::Category;

use crate::client::ApiClient;
use crate::error::ApiResult;

const ENTITY: &str = "Category";

/// Category CRUD with soft delete.
#[derive(Debug, Clone)]
pub struct CategoryService {
    client: ApiClient,
}

impl CategoryService {
    pub(crate) fn new(client: ApiClient) -> Self {
        CategoryService { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<Category>> {
        self.client.get("/categories", None).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Category> {
        self.client
            .get(&format!("/categories/{}", id), Some((ENTITY, id)))
            .await
    }

    pub async fn create(&self, dto: &CreateCategoryDto) -> ApiResult<Category> {
        validate_catalog_name(&dto.name)?;
        self.client.post("/categories", dto).await
    }

    pub async fn update(&self, id: &str, dto: &UpdateCategoryDto) -> ApiResult<Category> {
        if let Some(name) = &dto.name {
            validate_catalog_name(name)?;
        }
        self.client
            .patch(&format!("/categories/{}", id), dto, Some((ENTITY, id)))
            .await
    }

    pub async fn remove(&self, id: &str) -> ApiResult<()> {
        self.client
            .delete(&format!("/categories/{}", id), Some((ENTITY, id)))
            .await
    }

    pub async fn restore(&self, id: &str) -> ApiResult<()> {
        let builder = self
            .client
            .request(Method::PATCH, &format!("/categories/restore/{}", id));
        self.client.send_empty(builder, Some((ENTITY, id))).await
    }
}
