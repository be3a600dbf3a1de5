//! Time utilities: strict HH:MM parsing, clock and duration formatting.

use chrono::{NaiveTime, TimeDelta};
use regex::Regex;
use serde::Serializer;
use std::sync::LazyLock;

static HHMM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").unwrap());

/// Parse a time of day written exactly as `HH:MM`.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    if !HHMM.is_match(t) {
        return None;
    }
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

pub fn format_minutes(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}

/// Render a duration as `HH:MM`, dropping seconds.
pub fn format_duration(d: TimeDelta) -> String {
    format_minutes(d.num_minutes())
}

pub fn serialize_time<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_time(*t))
}

pub fn serialize_duration<S: Serializer>(d: &TimeDelta, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_duration(*d))
}

#[cfg(test)]
pub(crate) fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}
