use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use std::path::Path;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, path: &Path) -> AppResult<()> {
    if let Commands::Config { print_config, init } = cmd {
        // ---- INIT CONFIG ----
        if *init {
            if path.exists() {
                warning(format!(
                    "Configuration file already exists: {}",
                    path.display()
                ));
            } else {
                Config::default().save(path)?;
                success(format!("Config file: {}", path.display()));
            }
        }

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            print!("{}", cfg.to_yaml()?);
        }
    }

    Ok(())
}
