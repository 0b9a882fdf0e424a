//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `mnemonic_pdns` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//! - Printing records and mapping errors to the exit status
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use mnemonic_pdns::initialization::init_logger_with;
use mnemonic_pdns::config::{EXIT_SUCCESS, EXIT_USAGE};
use mnemonic_pdns::output::{report_outcome, IgnoreBrokenPipe};
use mnemonic_pdns::{run_search, Opt, PdnsClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // This allows setting MNEMONIC_API_KEY in .env without exporting it manually
    if dotenvy::dotenv().is_err() {
        // If .env not found in current dir, try next to the executable
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    // Parsed after .env is loaded so the API key can come from it
    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = opt.validate() {
        eprintln!("mnemonic-pdns error: {}", e);
        process::exit(EXIT_USAGE);
    }

    let client =
        PdnsClient::new(&opt.client_config()).context("Failed to initialize search client")?;

    let outcome = run_search(&client, &opt.search_options()).await;

    let mut stdout = IgnoreBrokenPipe::stdout();
    let mut stderr = std::io::stderr();
    let status = report_outcome(&outcome, opt.format, &mut stdout, &mut stderr)
        .context("Failed to print records")?;

    if status != EXIT_SUCCESS {
        process::exit(status);
    }
    Ok(())
}
