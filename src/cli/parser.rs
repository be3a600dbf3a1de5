use crate::export::ExportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for clubday
#[derive(Parser)]
#[command(
    name = "clubday",
    version = env!("CARGO_PKG_VERSION"),
    about = "Replay one day of a computer club: seating, waiting queue and per-table revenue",
    long_about = None
)]
pub struct Cli {
    /// Override the configuration file path
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate the day described by an event log and print the report
    Run {
        /// Event log (tables, opening hours, hourly rate, then one event per line)
        file: PathBuf,

        #[arg(long, value_enum, help = "Report format (default from config: text)")]
        format: Option<ExportFormat>,

        #[arg(long = "out", value_name = "FILE", help = "Write the report to a file")]
        out: Option<PathBuf>,

        #[arg(long, short = 'f', help = "Overwrite the output file without asking")]
        force: bool,
    },

    /// Validate an event log without simulating it
    Check {
        file: PathBuf,
    },

    /// Show or create the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "init", help = "Write a default configuration file")]
        init: bool,
    },
}
