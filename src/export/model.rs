// src/export/model.rs

use crate::models::{DayReport, TableSettlement};
use crate::utils::time::format_duration;
use serde::Serialize;

/// Flat per-table row for CSV output.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SettlementRow {
    pub table: usize,
    pub proceeds: u64,
    pub occupied: String,
}

impl From<&TableSettlement> for SettlementRow {
    fn from(t: &TableSettlement) -> Self {
        Self {
            table: t.table,
            proceeds: t.proceeds,
            occupied: format_duration(t.occupied),
        }
    }
}

pub(crate) fn settlement_rows(report: &DayReport) -> Vec<SettlementRow> {
    report.tables.iter().map(SettlementRow::from).collect()
}
