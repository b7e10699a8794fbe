//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `phish_scan` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - One-shot scanning or serving the HTTP API
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use phish_scan::initialization::{init_crypto_provider, init_logger_with};
use phish_scan::{scan_url, start_server, Config, Opt, ScanContext, ScanResponse};

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG may be set in .env; a missing file is fine
    let _ = dotenvy::dotenv();

    let config = Config::from(Opt::parse());

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = config.validate() {
        eprintln!("phish_scan error: {}", e);
        process::exit(2);
    }

    init_crypto_provider();

    let ctx = ScanContext::new(&config).context("Failed to initialize scanner")?;

    match config.url.as_deref() {
        Some(url) => match scan_url(&ctx, url).await {
            Ok(assessment) => {
                let json = serde_json::to_string_pretty(&ScanResponse::from(&assessment))
                    .context("Failed to serialize scan result")?;
                println!("{}", json);
                Ok(())
            }
            Err(e) => {
                eprintln!("phish_scan error: {}", e);
                process::exit(if e.is_invalid_input() { 2 } else { 1 });
            }
        },
        None => start_server(&config.bind_addr(), ctx).await,
    }
}
