use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::input::load_log;
use crate::ui::messages::success;
use crate::utils::time::format_time;

/// Validate an event log and summarize it.
pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Check { file } = cmd {
        let log = load_log(file)?;
        success(format!(
            "{}: {} tables, {}-{}, rate {}, {} events",
            file.display(),
            log.config.table_count,
            format_time(log.config.opens_at),
            format_time(log.config.closes_at),
            log.config.hourly_rate,
            log.events.len()
        ));
    }

    Ok(())
}
