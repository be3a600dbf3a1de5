// src/export/text.rs

use crate::models::DayReport;
use crate::utils::time::format_time;

/// Plain report: opening time, every record, closing time, then one
/// `<table> <proceeds> <HH:MM>` line per table.
pub(crate) fn render_text(report: &DayReport) -> String {
    let mut out = String::new();

    out.push_str(&format_time(report.opens_at));
    out.push('\n');

    for record in &report.records {
        out.push_str(&record.to_string());
        out.push('\n');
    }

    out.push_str(&format_time(report.closes_at));
    out.push('\n');

    for table in &report.tables {
        out.push_str(&table.to_string());
        out.push('\n');
    }

    out
}
