use vendora_core::dto::UpdateUserDto;
use vendora_core::validation::{validate_length, validate_password, MIN_PASSWORD_LEN};
use vendora_core::User;

use crate::client::ApiClient;
use crate::error::ApiResult;

const ENTITY: &str = "User";

/// Operator accounts. Creation goes through [`AuthService::register`](crate::services::AuthService::register).
#[derive(Debug, Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub(crate) fn new(client: ApiClient) -> Self {
        UserService { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<User>> {
        self.client.get("/users", None).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<User> {
        self.client
            .get(&format!("/users/{}", id), Some((ENTITY, id)))
            .await
    }

    pub async fn update(&self, id: &str, dto: &UpdateUserDto) -> ApiResult<User> {
        if let Some(name) = &dto.name {
            validate_length("name", name, 3, 50)?;
        }
        if let Some(password) = &dto.password {
            validate_password(password, MIN_PASSWORD_LEN)?;
        }
        self.client
            .patch(&format!("/users/{}", id), dto, Some((ENTITY, id)))
            .await
    }
}
