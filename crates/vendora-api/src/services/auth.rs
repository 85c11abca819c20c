//! Login, registration and the local session.

use tracing::info;
use vendora_core::dto::{CreateUserDto, LoginRequest, LoginResponse};
use vendora_core::validation::validate_create_user;
use vendora_core::{SessionUser, User};

use crate::client::ApiClient;
use crate::error::ApiResult;

#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub(crate) fn new(client: ApiClient) -> Self {
        AuthService { client }
    }

    /// `POST /auth/login`; the returned token is stored for later requests.
    ///
    /// Returns the operator decoded from the token claims, if decodable.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Option<SessionUser>> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self.client.post("/auth/login", &request).await?;
        let user = self.client.tokens().set(response.access_token)?;

        info!(email = %request.email, "Signed in");
        Ok(user)
    }

    /// `POST /auth/register`. Does not sign in.
    pub async fn register(&self, dto: &CreateUserDto) -> ApiResult<User> {
        validate_create_user(dto)?;
        self.client.post("/auth/register", dto).await
    }

    /// Drops the stored token.
    pub fn logout(&self) -> ApiResult<()> {
        self.client.tokens().clear()?;
        info!("Signed out");
        Ok(())
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.client.tokens().current_user()
    }
}
