use crate::utils::time::{format_time, serialize_time};
use chrono::NaiveTime;
use serde::Serialize;
use std::fmt;

/// What a client asks the club to do. The numeric ids are the ones used in
/// the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Arrive,
    SeatAt(usize),
    JoinWaiting,
    Leave,
}

impl EventKind {
    pub fn id(&self) -> u8 {
        match self {
            EventKind::Arrive => 1,
            EventKind::SeatAt(_) => 2,
            EventKind::JoinWaiting => 3,
            EventKind::Leave => 4,
        }
    }

    /// Build a kind from its log id. Only id 2 carries a table; any other
    /// combination is rejected.
    pub fn from_id(id: u8, table: Option<usize>) -> Option<Self> {
        match (id, table) {
            (1, None) => Some(EventKind::Arrive),
            (2, Some(t)) => Some(EventKind::SeatAt(t)),
            (3, None) => Some(EventKind::JoinWaiting),
            (4, None) => Some(EventKind::Leave),
            _ => None,
        }
    }

    pub fn table(&self) -> Option<usize> {
        match self {
            EventKind::SeatAt(t) => Some(*t),
            _ => None,
        }
    }
}

/// One line of the incoming log, already validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    #[serde(serialize_with = "serialize_time")]
    pub at: NaiveTime,
    pub client: String,
    pub kind: EventKind,
}

impl Event {
    pub fn new(at: NaiveTime, client: impl Into<String>, kind: EventKind) -> Self {
        Self {
            at,
            client: client.into(),
            kind,
        }
    }

    pub fn arrive(at: NaiveTime, client: impl Into<String>) -> Self {
        Self::new(at, client, EventKind::Arrive)
    }

    pub fn seat_at(at: NaiveTime, client: impl Into<String>, table: usize) -> Self {
        Self::new(at, client, EventKind::SeatAt(table))
    }

    pub fn join_waiting(at: NaiveTime, client: impl Into<String>) -> Self {
        Self::new(at, client, EventKind::JoinWaiting)
    }

    pub fn leave(at: NaiveTime, client: impl Into<String>) -> Self {
        Self::new(at, client, EventKind::Leave)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", format_time(self.at), self.kind.id(), self.client)?;
        if let Some(table) = self.kind.table() {
            write!(f, " {table}")?;
        }
        Ok(())
    }
}
