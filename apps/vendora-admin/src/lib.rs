//! # Vendora Admin Library
//!
//! Operator console for the Vendora back office: sign in, compose a sale
//! against the live catalog, submit it, review sales history.
//!
//! ## Module Organization
//! ```text
//! vendora_admin/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── composer.rs ◄─── Sale composer state
//! │   ├── session.rs  ◄─── Signed-in operator
//! │   └── config.rs   ◄─── Currency display
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── auth.rs     ◄─── login / logout / session restore
//! │   ├── catalog.rs  ◄─── Product and client lookups
//! │   └── sale.rs     ◄─── Composer and sales history commands
//! ├── console/
//! │   ├── mod.rs      ◄─── Console loop
//! │   ├── parse.rs    ◄─── Command grammar
//! │   └── render.rs   ◄─── Text views
//! └── error.rs        ◄─── Error type for commands
//! ```

pub mod commands;
pub mod console;
pub mod error;
pub mod state;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vendora_api::{ApiClient, ApiConfig};

use error::AppResult;
use state::{DisplayConfig, SessionState};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "vendora-admin", version, about = "Vendora operator console")]
pub struct Cli {
    /// Path to the config file (default: platform config dir/vendora.toml).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// API base URL, overriding config file and environment.
    #[arg(long)]
    pub url: Option<String>,
}

/// Runs the console until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: WARN, INFO for vendora crates; RUST_LOG overrides        │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → vendora.toml → VENDORA_* env → --url                   │
/// │                                                                         │
/// │  3. Build API Client ─────────────────────────────────────────────────► │
/// │     • Restore a persisted token, if any                                 │
/// │                                                                         │
/// │  4. Initialize State Objects ─────────────────────────────────────────► │
/// │     • SessionState, DisplayConfig, ComposerState (closed)               │
/// │                                                                         │
/// │  5. Console Loop ─────────────────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> AppResult<()> {
    init_tracing();

    info!("Starting Vendora admin console");

    let mut config = ApiConfig::load(cli.config)?;
    if let Some(url) = cli.url {
        config.base_url = url;
        config.validate()?;
    }
    info!(base_url = %config.base_url, "Configuration loaded");

    let api = ApiClient::new(&config)?;
    let session = SessionState::new();
    if commands::auth::restore_session(&api, &session)?.is_none() {
        info!("Not signed in");
    }

    let (console, output) = console::Console::new(api, session, DisplayConfig::from_env());
    console::run(console, output).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they do not interleave with console output
/// when stdout is redirected.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=vendora=trace` - Show trace for vendora crates only
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,vendora=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
