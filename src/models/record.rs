use super::event::Event;
use crate::utils::time::{format_time, serialize_time};
use chrono::NaiveTime;
use serde::Serialize;
use std::fmt;

/// Why the club refused an incoming event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// The client is already inside.
    DuplicatePresence,
    /// Arrival before opening or after closing.
    OutsideOperatingHours,
    /// The client never arrived or has already left.
    ClientNotPresent,
    /// The requested table has a ticket.
    TableOccupied,
    /// A table is free, so there is nothing to wait for.
    TableAvailable,
    /// The waiting queue is full; the client is sent home.
    QueueFull,
}

impl Rejection {
    /// Tag printed in error records. `QueueFull` has none: it surfaces as a
    /// forced departure instead.
    pub fn reason_tag(&self) -> Option<&'static str> {
        match self {
            Rejection::DuplicatePresence => Some("YouShallNotPass"),
            Rejection::OutsideOperatingHours => Some("NotOpenYet"),
            Rejection::ClientNotPresent => Some("ClientUnknown"),
            Rejection::TableOccupied => Some("PlaceIsBusy"),
            Rejection::TableAvailable => Some("ICanWaitNoLonger!"),
            Rejection::QueueFull => None,
        }
    }
}

/// One line of the day's output, either echoed from the log or produced by
/// the club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record {
    Incoming(Event),
    ForcedLeave {
        #[serde(serialize_with = "serialize_time")]
        at: NaiveTime,
        client: String,
    },
    Seated {
        #[serde(serialize_with = "serialize_time")]
        at: NaiveTime,
        client: String,
        table: usize,
    },
    Rejected {
        #[serde(serialize_with = "serialize_time")]
        at: NaiveTime,
        reason: Rejection,
    },
}

impl Record {
    pub const FORCED_LEAVE: u8 = 11;
    pub const SEATED: u8 = 12;
    pub const REJECTED: u8 = 13;

    pub fn code(&self) -> u8 {
        match self {
            Record::Incoming(ev) => ev.kind.id(),
            Record::ForcedLeave { .. } => Self::FORCED_LEAVE,
            Record::Seated { .. } => Self::SEATED,
            Record::Rejected { .. } => Self::REJECTED,
        }
    }

    pub fn at(&self) -> NaiveTime {
        match self {
            Record::Incoming(ev) => ev.at,
            Record::ForcedLeave { at, .. }
            | Record::Seated { at, .. }
            | Record::Rejected { at, .. } => *at,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Incoming(ev) => write!(f, "{ev}"),
            Record::ForcedLeave { at, client } => {
                write!(f, "{} {} {}", format_time(*at), self.code(), client)
            }
            Record::Seated { at, client, table } => {
                write!(f, "{} {} {} {}", format_time(*at), self.code(), client, table)
            }
            Record::Rejected { at, reason } => {
                write!(f, "{} {}", format_time(*at), self.code())?;
                if let Some(tag) = reason.reason_tag() {
                    write!(f, " {tag}")?;
                }
                Ok(())
            }
        }
    }
}
