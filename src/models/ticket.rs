use chrono::{NaiveTime, TimeDelta};

/// One continuous seating session at a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub client: String,
    pub started_at: NaiveTime,
}

impl Ticket {
    pub fn new(client: impl Into<String>, started_at: NaiveTime) -> Self {
        Self {
            client: client.into(),
            started_at,
        }
    }

    /// Time spent at the table when the ticket is closed at `ended_at`.
    /// Never negative: a close before the start counts as zero.
    pub fn duration_until(&self, ended_at: NaiveTime) -> TimeDelta {
        (ended_at - self.started_at).max(TimeDelta::zero())
    }
}
