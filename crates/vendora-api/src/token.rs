//! # Token Store
//!
//! Holds the bearer token of the signed-in operator.
//!
//! ## Token Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Token Lifecycle                                  │
//! │                                                                         │
//! │  startup ──► load() ──► file exists? ──no──► signed out                 │
//! │                              │                                          │
//! │                             yes                                         │
//! │                              ▼                                          │
//! │                     claims decode? ──no──► file removed, signed out     │
//! │                              │                                          │
//! │                             yes ──► signed in as SessionUser            │
//! │                                                                         │
//! │  login  ──► set(token)  ──► memory + file                              │
//! │  logout ──► clear()     ──► memory + file removed                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Claims are decoded WITHOUT verifying the signature: the client only
//! reads display fields, the API verifies the token on every request.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info, warn};
use vendora_core::SessionUser;

use crate::config::ApiConfig;
use crate::error::ApiResult;

/// Display name used when the token carries no `name` claim.
pub const DEFAULT_USER_NAME: &str = "User";

#[derive(Debug, Deserialize)]
struct Claims {
    name: Option<String>,
    email: Option<String>,
    sub: Option<serde_json::Value>,
}

/// Decodes the display claims of a bearer token.
///
/// ## Fallbacks
/// - `name` missing → [`DEFAULT_USER_NAME`]
/// - `email` missing → `sub`
pub fn decode_claims(token: &str) -> ApiResult<SessionUser> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = jsonwebtoken::decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    let claims = data.claims;

    let sub = claims.sub.map(|v| match v {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    });

    Ok(SessionUser {
        name: claims
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_NAME.to_string()),
        email: claims.email.or(sub),
    })
}

// =============================================================================
// Token Store
// =============================================================================

/// Shared bearer token, optionally persisted to a file.
#[derive(Debug, Default)]
pub struct TokenStore {
    token: RwLock<Option<String>>,
    path: Option<PathBuf>,
}

impl TokenStore {
    /// A store that forgets the token on exit.
    pub fn in_memory() -> Self {
        TokenStore::default()
    }

    /// A store persisted at `path`.
    pub fn persistent(path: impl Into<PathBuf>) -> Self {
        TokenStore {
            token: RwLock::new(None),
            path: Some(path.into()),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        match &config.token_path {
            Some(path) => TokenStore::persistent(path),
            None => TokenStore::in_memory(),
        }
    }

    /// Restores a persisted token.
    ///
    /// An undecodable token is deleted and `Ok(None)` is returned.
    pub fn load(&self) -> ApiResult<Option<SessionUser>> {
        let Some(path) = self.path.as_deref() else {
            return Ok(self.current_user());
        };

        if !path.exists() {
            debug!(?path, "No persisted token");
            return Ok(None);
        }

        let token = std::fs::read_to_string(path)?.trim().to_string();
        match decode_claims(&token) {
            Ok(user) => {
                info!(user = %user.name, "Restored session");
                *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
                Ok(Some(user))
            }
            Err(e) => {
                warn!(error = %e, ?path, "Invalid persisted token, removing");
                remove_file(path)?;
                Ok(None)
            }
        }
    }

    /// Stores a freshly issued token and returns the decoded operator.
    ///
    /// The token is kept even when its claims cannot be decoded; the
    /// operator is then `None`.
    pub fn set(&self, token: impl Into<String>) -> ApiResult<Option<SessionUser>> {
        let token = token.into();

        if let Some(path) = self.path.as_deref() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &token)?;
            debug!(?path, "Token persisted");
        }

        let user = match decode_claims(&token) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Token claims could not be decoded");
                None
            }
        };

        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
        Ok(user)
    }

    /// Forgets the token in memory and on disk.
    pub fn clear(&self) -> ApiResult<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        if let Some(path) = self.path.as_deref() {
            remove_file(path)?;
        }
        Ok(())
    }

    pub fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The operator of the current token, if it decodes.
    pub fn current_user(&self) -> Option<SessionUser> {
        self.get().and_then(|t| decode_claims(&t).ok())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }
}

fn remove_file(path: &Path) -> ApiResult<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod test_tokens {
    use jsonwebtoken::{EncodingKey, Header};

    /// Signs arbitrary claims with a throwaway secret.
    pub fn token(claims: serde_json::Value) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"not-the-server-secret"),
        )
        .unwrap()
    }
}
