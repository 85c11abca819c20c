//! Sign-in commands.
//!
//! The token is owned by the API client's `TokenStore`; these keep the
//! console's `SessionState` in step with it.

use tracing::debug;
use vendora_api::token::DEFAULT_USER_NAME;
use vendora_api::ApiClient;
use vendora_core::SessionUser;

use crate::error::AppResult;
use crate::state::SessionState;

/// Signs in and caches the operator for the prompt.
///
/// A token whose claims cannot be decoded still authenticates requests;
/// the operator is then shown under a generic name.
pub async fn login(
    api: &ApiClient,
    session: &SessionState,
    email: &str,
    password: &str,
) -> AppResult<SessionUser> {
    debug!(email, "login command");
    let user = api
        .auth()
        .login(email, password)
        .await?
        .unwrap_or_else(|| SessionUser {
            name: DEFAULT_USER_NAME.to_string(),
            email: Some(email.trim().to_string()),
        });

    session.set(Some(user.clone()));
    Ok(user)
}

pub fn logout(api: &ApiClient, session: &SessionState) -> AppResult<()> {
    debug!("logout command");
    session.clear();
    api.auth().logout()?;
    Ok(())
}

/// Picks up a token persisted by an earlier run.
pub fn restore_session(api: &ApiClient, session: &SessionState) -> AppResult<Option<SessionUser>> {
    debug!("restore_session command");
    let user = api.tokens().load()?;
    session.set(user.clone());
    Ok(user)
}

pub fn whoami(session: &SessionState) -> Option<SessionUser> {
    session.current()
}
