use crate::errors::{AppError, AppResult};
use crate::utils::time::{format_time, serialize_time};
use chrono::NaiveTime;
use serde::Serialize;

/// Fixed parameters of one club day. Immutable once the simulation starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayConfig {
    pub table_count: usize,
    #[serde(serialize_with = "serialize_time")]
    pub opens_at: NaiveTime,
    #[serde(serialize_with = "serialize_time")]
    pub closes_at: NaiveTime,
    pub hourly_rate: u64,
}

impl DayConfig {
    pub fn new(
        table_count: usize,
        opens_at: NaiveTime,
        closes_at: NaiveTime,
        hourly_rate: u64,
    ) -> AppResult<Self> {
        if table_count == 0 {
            return Err(AppError::InvalidDayConfig(
                "the club needs at least one table".to_string(),
            ));
        }

        if opens_at >= closes_at {
            return Err(AppError::InvalidDayConfig(format!(
                "opening time {} is not before closing time {}",
                format_time(opens_at),
                format_time(closes_at)
            )));
        }

        Ok(Self {
            table_count,
            opens_at,
            closes_at,
            hourly_rate,
        })
    }

    /// True when `at` falls inside the opening hours, both ends included.
    pub fn is_open_at(&self, at: NaiveTime) -> bool {
        at >= self.opens_at && at <= self.closes_at
    }

    pub fn has_table(&self, table: usize) -> bool {
        (1..=self.table_count).contains(&table)
    }
}
