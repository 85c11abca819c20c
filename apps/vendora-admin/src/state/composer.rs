//! # Composer State
//!
//! Holds the sale being composed.
//!
//! ## Thread Safety
//! The composer is wrapped in `Arc<Mutex<T>>` because:
//! 1. The console and an in-flight submission task both touch it
//! 2. Only one of them may modify it at a time
//! 3. Every operation is short and synchronous
//!
//! The lock is NEVER held across an `.await`:
//! ```text
//! submit:  lock ─ begin_submission ─ unlock
//!                     │
//!                     ▼  (await POST /sales, lock free: `cancel` may run)
//!          lock ─ complete/fail(ticket) ─ unlock
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use vendora_core::{Catalog, SaleComposer};

use crate::error::{AppError, AppResult};

/// App-managed composer state. `None` until the operator opens a sale.
#[derive(Debug, Clone, Default)]
pub struct ComposerState {
    composer: Arc<Mutex<Option<SaleComposer>>>,
}

impl ComposerState {
    pub fn new() -> Self {
        ComposerState::default()
    }

    /// Opens a composer over `catalog`, or reopens the existing one.
    pub fn open(&self, catalog: Catalog) {
        let mut guard = self.composer.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_mut() {
            Some(composer) => composer.reopen(catalog),
            None => *guard = Some(SaleComposer::new(catalog)),
        }
    }

    pub fn is_open(&self) -> bool {
        self.composer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Executes a function with read access to the composer.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = state.with_composer(|c| c.total())?;
    /// ```
    pub fn with_composer<F, R>(&self, f: F) -> AppResult<R>
    where
        F: FnOnce(&SaleComposer) -> R,
    {
        let guard = self.composer.lock().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(f).ok_or_else(AppError::no_open_sale)
    }

    /// Executes a function with write access to the composer.
    pub fn with_composer_mut<F, R>(&self, f: F) -> AppResult<R>
    where
        F: FnOnce(&mut SaleComposer) -> R,
    {
        let mut guard = self.composer.lock().unwrap_or_else(PoisonError::into_inner);
        guard.as_mut().map(f).ok_or_else(AppError::no_open_sale)
    }
}
