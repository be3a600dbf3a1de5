//! The club simulator: admission, seating, waiting queue and billing.

pub mod calculator;
pub mod club;

pub use club::{Club, TableLedger};

use crate::models::{DayConfig, DayReport, Event};

/// Replay a whole day and settle it.
///
/// `events` must already be in non-decreasing time order; the simulator
/// neither sorts nor checks it.
pub fn simulate<'a, I>(config: DayConfig, events: I) -> DayReport
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut club = Club::new(config);
    for event in events {
        club.apply(event);
    }
    club.close_day()
}
