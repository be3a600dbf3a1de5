use super::record::Record;
use crate::utils::time::{format_duration, serialize_duration, serialize_time};
use chrono::{NaiveTime, TimeDelta};
use serde::Serialize;
use std::fmt;

/// Totals for one table at the end of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSettlement {
    pub table: usize,
    pub proceeds: u64,
    #[serde(serialize_with = "serialize_duration")]
    pub occupied: TimeDelta,
}

impl fmt::Display for TableSettlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.table,
            self.proceeds,
            format_duration(self.occupied)
        )
    }
}

/// Everything the club produced for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayReport {
    #[serde(serialize_with = "serialize_time")]
    pub opens_at: NaiveTime,
    pub records: Vec<Record>,
    #[serde(serialize_with = "serialize_time")]
    pub closes_at: NaiveTime,
    pub tables: Vec<TableSettlement>,
}

impl DayReport {
    pub fn total_proceeds(&self) -> u64 {
        self.tables
            .iter()
            .fold(0, |acc, t| acc.saturating_add(t.proceeds))
    }

    pub fn table(&self, table: usize) -> Option<&TableSettlement> {
        self.tables.iter().find(|t| t.table == table)
    }
}
