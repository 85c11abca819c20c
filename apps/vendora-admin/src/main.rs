//! # Vendora Admin Entry Point
//!
//! ```text
//! vendora-admin [--config <PATH>] [--url <URL>]
//! ```
//!
//! The actual setup is in lib.rs so it can be tested.

use clap::Parser;
use vendora_admin::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = vendora_admin::run(cli).await {
        eprintln!("error {}", e);
        std::process::exit(1);
    }
}
