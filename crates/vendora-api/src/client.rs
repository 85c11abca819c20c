//! # API Client
//!
//! Thin wrapper over `reqwest` shared by every service.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Request Flow                                    │
//! │                                                                         │
//! │  service call (e.g. products().get("P1"))                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  request(method, path) ──► base_url + path, Bearer <token> if stored   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  send ──► transport failure ──────────────► ApiClientError::Network    │
//! │       │                                                                 │
//! │       ├── 2xx ──► decode JSON body ─────────► T / ApiClientError::Decode│
//! │       │                                                                 │
//! │       └── 4xx/5xx ──► read { message } ────► ApiClientError::from_status│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No retries: failures are returned to the caller as they happened.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{ApiClientError, ApiResult};
use crate::services::{
    AuthService, CategoryService, ClientService, ProductService, SaleService, UserService,
};
use crate::token::TokenStore;

/// `(entity, id)` of a single-resource request, used to report 404s.
pub(crate) type Resource<'a> = Option<(&'a str, &'a str)>;

/// HTTP client for the Vendora REST API.
///
/// Cheap to clone: clones share the connection pool and the token store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenStore>,
}

impl ApiClient {
    /// Builds a client with a token store derived from the config.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        Self::with_token_store(config, Arc::new(TokenStore::from_config(config)))
    }

    /// Builds a client sharing an existing token store.
    pub fn with_token_store(config: &ApiConfig, tokens: Arc<TokenStore>) -> ApiResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(ApiClient {
            http,
            base_url: config.api_root().to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    // =========================================================================
    // Services
    // =========================================================================

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.clone())
    }

    pub fn products(&self) -> ProductService {
        ProductService::new(self.clone())
    }

    pub fn categories(&self) -> CategoryService {
        CategoryService::new(self.clone())
    }

    pub fn clients(&self) -> ClientService {
        ClientService::new(self.clone())
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.clone())
    }

    pub fn sales(&self) -> SaleService {
        SaleService::new(self.clone())
    }

    // =========================================================================
    // Request Helpers
    // =========================================================================

    /// Starts a request, attaching the bearer token when one is stored.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "API request");

        let builder = self.http.request(method, url);
        match self.tokens.get() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, resource: Resource<'_>) -> ApiResult<T> {
        self.send_json(self.request(Method::GET, path), resource).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.request(Method::POST, path).json(body), None)
            .await
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, body: &B, resource: Resource<'_>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.request(Method::PATCH, path).json(body), resource)
            .await
    }

    pub(crate) async fn delete(&self, path: &str, resource: Resource<'_>) -> ApiResult<()> {
        self.send_empty(self.request(Method::DELETE, path), resource)
            .await
    }

    /// Sends a request and decodes a JSON response body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        resource: Resource<'_>,
    ) -> ApiResult<T> {
        let response = Self::check(builder.send().await?, resource).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Sends a request whose response body is ignored.
    pub(crate) async fn send_empty(&self, builder: RequestBuilder, resource: Resource<'_>) -> ApiResult<()> {
        Self::check(builder.send().await?, resource).await?;
        Ok(())
    }

    /// Maps a non-success response to an error.
    async fn check(response: Response, resource: Resource<'_>) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        let err = ApiClientError::from_status(status, &body, resource);
        warn!(status = status.as_u16(), %url, error = %err, "API request failed");
        Err(err)
    }
}
