// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::json_csv::{render_csv, render_json};
use crate::export::notify_export_success;
use crate::export::text::render_text;
use crate::models::DayReport;
use crate::ui::messages::info;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// High-level report output.
pub struct ExportLogic;

impl ExportLogic {
    /// Render the report in the requested format.
    pub fn render(report: &DayReport, format: ExportFormat) -> AppResult<String> {
        match format {
            ExportFormat::Text => Ok(render_text(report)),
            ExportFormat::Json => render_json(report),
            ExportFormat::Csv => render_csv(report),
        }
    }

    /// Write the rendered report to `out`, or to stdout when no file is given.
    pub fn export(
        report: &DayReport,
        format: ExportFormat,
        out: Option<&Path>,
        force: bool,
    ) -> AppResult<()> {
        let rendered = Self::render(report, format)?;
        debug!(format = format.as_str(), bytes = rendered.len(), "report rendered");

        match out {
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(rendered.as_bytes())?;
                stdout.flush()?;
            }
            Some(path) => {
                if path.exists() {
                    if !force {
                        return Err(AppError::Export(format!(
                            "a report already exists at '{}', pass --force to replace it",
                            path.display()
                        )));
                    }
                    info(format!("Replacing previous report at {}", path.display()));
                }
                fs::write(path, rendered)?;
                notify_export_success(format.as_str(), path);
            }
        }

        Ok(())
    }
}
