use reqwest::Method;
use vendora_core::dto::{CreateClientDto, UpdateClientDto};
use vendora_core::validation::{validate_create_client, validate_email, validate_length};
use vendora_core::Client;

use crate::client::ApiClient;
use crate::error::ApiResult;

const ENTITY: &str = "Client";

/// Customer CRUD with soft delete.
#[derive(Debug, Clone)]
pub struct ClientService {
    client: ApiClient,
}

impl ClientService {
    pub(crate) fn new(client: ApiClient) -> Self {
        ClientService { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<Client>> {
        self.client.get("/clients", None).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Client> {
        self.client
            .get(&format!("/clients/{}", id), Some((ENTITY, id)))
            .await
    }

    pub async fn create(&self, dto: &CreateClientDto) -> ApiResult<Client> {
        validate_create_client(dto)?;
        self.client.post("/clients", dto).await
    }

    /// Validates only the fields being changed.
    pub async fn update(&self, id: &str, dto: &UpdateClientDto) -> ApiResult<Client> {
        if let Some(name) = &dto.name {
            validate_length("name", name, 3, 50)?;
        }
        if let Some(email) = &dto.email {
            validate_email(email)?;
        }
        if let Some(phone) = &dto.phone {
            validate_length("phone", phone, 3, 15)?;
        }
        if let Some(address) = &dto.address {
            validate_length("address", address, 3, 200)?;
        }
        if let Some(zip_code) = &dto.zip_code {
            validate_length("zipCode", zip_code, 3, 8)?;
        }

        self.client
            .patch(&format!("/clients/{}", id), dto, Some((ENTITY, id)))
            .await
    }

    pub async fn remove(&self, id: &str) -> ApiResult<()> {
        self.client
            .delete(&format!("/clients/{}", id), Some((ENTITY, id)))
            .await
    }

    pub async fn restore(&self, id: &str) -> ApiResult<()> {
        let builder = self
            .client
            .request(Method::PATCH, &format!("/clients/restore/{}", id));
        self.client.send_empty(builder, Some((ENTITY, id))).await
    }
}
