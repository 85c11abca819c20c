//! # Session State
//!
//! Who is signed in. The token itself lives in the API client's
//! `TokenStore`; this only caches the decoded operator for display.

use std::sync::{Arc, PoisonError, RwLock};

use vendora_core::SessionUser;

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    user: Arc<RwLock<Option<SessionUser>>>,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState::default()
    }

    pub fn set(&self, user: Option<SessionUser>) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = user;
    }

    pub fn clear(&self) {
        self.set(None);
    }

    pub fn current(&self) -> Option<SessionUser> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current().is_some()
    }

    /// Console prompt, e.g. `Ana> ` or `> ` when signed out.
    pub fn prompt(&self) -> String {
        match self.current() {
            Some(user) => format!("{}> ", user.name),
            None => "> ".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_follows_session() {
        let session = SessionState::new();
        assert_eq!(session.prompt(), "> ");

        session.set(Some(SessionUser {
            name: "Ana".to_string(),
            email: None,
        }));
        assert!(session.is_signed_in());
        assert_eq!(session.prompt(), "Ana> ");

        session.clear();
        assert!(!session.is_signed_in());
    }
}
