//! clubday library root.
//! Exposes the club simulator, the event log loader, report rendering and
//! the CLI dispatcher.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod input;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::io;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, config_path: &Path) -> AppResult<()> {
    match &cli.command {
        Commands::Run { .. } => cli::commands::run::handle(&cli.command, cfg),
        Commands::Check { .. } => cli::commands::check::handle(&cli.command),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg, config_path),
    }
}

/// Install the stderr `tracing` subscriber. `RUST_LOG` wins over the
/// configured filter.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second install (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once, honouring --config
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(Config::config_file);
    let cfg = Config::load(Some(config_path.as_path()))?;

    // 3️⃣ logging
    init_tracing(&cfg.log_filter);
    tracing::debug!(config = %config_path.display(), "configuration loaded");

    // 4️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg, &config_path)
}
