use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::simulate;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::input::load_log;
use tracing::info;

/// Simulate a day and output the report.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Run {
        file,
        format,
        out,
        force,
    } = cmd
    {
        //
        // 1. Load and validate the event log
        //
        let log = load_log(file)?;
        info!(
            file = %file.display(),
            tables = log.config.table_count,
            events = log.events.len(),
            "simulating club day"
        );

        //
        // 2. Replay and settle
        //
        let report = simulate(log.config, &log.events);

        //
        // 3. Render
        //
        let format = format.unwrap_or(cfg.default_format);
        ExportLogic::export(&report, format, out.as_deref(), *force)?;
    }

    Ok(())
}
