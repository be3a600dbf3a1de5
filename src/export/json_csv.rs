// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::settlement_rows;
use crate::models::DayReport;

/// Pretty-printed JSON of the whole report.
pub(crate) fn render_json(report: &DayReport) -> AppResult<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

/// CSV with one row per table (header included thanks to serde).
pub(crate) fn render_csv(report: &DayReport) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    for row in settlement_rows(report) {
        wtr.serialize(row)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;

    String::from_utf8(bytes).map_err(|e| AppError::Export(format!("CSV encoding error: {e}")))
}
