//! Event log parser.
//!
//! Layout:
//! ```text
//! 3
//! 09:00 19:00
//! 10
//! 08:48 1 client1
//! 09:54 2 client1 1
//! ```
//! The first malformed line stops loading and is reported verbatim.

use crate::errors::{AppError, AppResult};
use crate::models::{DayConfig, Event, EventKind};
use crate::utils::time::parse_time;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

static CLIENT_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").unwrap());
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());

/// A parsed log: the day's parameters and its events in time order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog {
    pub config: DayConfig,
    pub events: Vec<Event>,
}

pub fn load_log(path: &Path) -> AppResult<EventLog> {
    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "event log read");
    parse_log(&content)
}

pub fn parse_log(content: &str) -> AppResult<EventLog> {
    if content.trim().is_empty() {
        return Err(AppError::EmptyLog);
    }

    let mut lines = content.lines().map(|l| l.trim_end_matches('\r')).enumerate();

    // ------------------------------------------------
    // Header: tables, opening hours, hourly rate
    // ------------------------------------------------
    let tables_line = next_header(&mut lines, 1)?;
    let table_count = parse_number(tables_line)
        .and_then(|n| usize::try_from(n).ok())
        .filter(|n| *n > 0)
        .ok_or_else(|| invalid(1, tables_line))?;

    let hours_line = next_header(&mut lines, 2)?;
    let (opens_at, closes_at) = parse_hours(hours_line).ok_or_else(|| invalid(2, hours_line))?;

    let rate_line = next_header(&mut lines, 3)?;
    let hourly_rate = parse_number(rate_line).ok_or_else(|| invalid(3, rate_line))?;

    let config = DayConfig::new(table_count, opens_at, closes_at, hourly_rate)
        .map_err(|_| invalid(2, hours_line))?;

    // ------------------------------------------------
    // Events
    // ------------------------------------------------
    let mut events: Vec<Event> = Vec::new();
    for (idx, line) in lines {
        let number = idx + 1;
        let event = parse_event(line, &config).ok_or_else(|| invalid(number, line))?;

        if events.last().is_some_and(|prev| prev.at > event.at) {
            return Err(invalid(number, line));
        }
        events.push(event);
    }

    debug!(tables = table_count, events = events.len(), "event log parsed");
    Ok(EventLog { config, events })
}

fn next_header<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    number: usize,
) -> AppResult<&'a str> {
    lines
        .next()
        .map(|(_, line)| line)
        .ok_or_else(|| invalid(number, ""))
}

fn invalid(number: usize, line: &str) -> AppError {
    AppError::InvalidLine {
        number,
        line: line.to_string(),
    }
}

fn parse_number(s: &str) -> Option<u64> {
    if !NUMBER.is_match(s) {
        return None;
    }
    s.parse().ok()
}

fn parse_hours(line: &str) -> Option<(chrono::NaiveTime, chrono::NaiveTime)> {
    let (open, close) = line.split_once(' ')?;
    Some((parse_time(open)?, parse_time(close)?))
}

fn parse_event(line: &str, config: &DayConfig) -> Option<Event> {
    let fields: Vec<&str> = line.split(' ').collect();
    if !(3..=4).contains(&fields.len()) {
        return None;
    }

    let at = parse_time(fields[0])?;
    let id = u8::try_from(parse_number(fields[1])?).ok()?;

    let client = fields[2];
    if !CLIENT_NAME.is_match(client) {
        return None;
    }

    let table = match fields.get(3) {
        Some(raw) => {
            let table = usize::try_from(parse_number(raw)?).ok()?;
            if !config.has_table(table) {
                return None;
            }
            Some(table)
        }
        None => None,
    };

    let kind = EventKind::from_id(id, table)?;
    Some(Event::new(at, client, kind))
}
