//! # State Module
//!
//! Application state, split into focused types the way commands need them.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐      │
//! │  │  ComposerState   │  │  SessionState    │  │  DisplayConfig   │      │
//! │  │                  │  │                  │  │                  │      │
//! │  │  Arc<Mutex<      │  │  Arc<RwLock<     │  │  currency symbol │      │
//! │  │   Option<        │  │   Option<        │  │  decimals        │      │
//! │  │   SaleComposer>  │  │   SessionUser>   │  │                  │      │
//! │  │  >>              │  │  >>              │  │                  │      │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────┘      │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • ComposerState: exclusive access, never locked across .await          │
//! │  • SessionState: many readers (prompt), rare writers (login/logout)     │
//! │  • DisplayConfig: read-only after startup                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod composer;
mod config;
mod session;

pub use composer::ComposerState;
pub use config::DisplayConfig;
pub use session::SessionState;
