use crate::core::calculator::billing;
use crate::models::{
    DayConfig, DayReport, Event, EventKind, Record, Rejection, TableSettlement, Ticket,
};
use chrono::{NaiveTime, TimeDelta};
use std::collections::{BTreeSet, HashMap, VecDeque};
use tracing::{debug, info, warn};

/// Accumulated usage of one table. Both fields only grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLedger {
    pub occupied: TimeDelta,
    pub proceeds: u64,
}

impl Default for TableLedger {
    fn default() -> Self {
        Self {
            occupied: TimeDelta::zero(),
            proceeds: 0,
        }
    }
}

/// State of the club during one day.
///
/// Presence and seating are tracked separately: a present client may be
/// seated, waiting, or neither. `seated_at` mirrors `seats` so that the
/// client → table lookup never scans.
#[derive(Debug)]
pub struct Club {
    config: DayConfig,
    present: BTreeSet<String>,
    seats: Vec<Option<Ticket>>,
    seated_at: HashMap<String, usize>,
    waiting: VecDeque<String>,
    ledger: Vec<TableLedger>,
    records: Vec<Record>,
}

impl Club {
    pub fn new(config: DayConfig) -> Self {
        let tables = config.table_count;
        Self {
            config,
            present: BTreeSet::new(),
            seats: vec![None; tables],
            seated_at: HashMap::new(),
            waiting: VecDeque::new(),
            ledger: vec![TableLedger::default(); tables],
            records: Vec::new(),
        }
    }

    pub fn config(&self) -> &DayConfig {
        &self.config
    }

    /// Clients inside the club, in name order.
    pub fn present(&self) -> impl Iterator<Item = &str> {
        self.present.iter().map(String::as_str)
    }

    pub fn is_present(&self, client: &str) -> bool {
        self.present.contains(client)
    }

    /// Waiting queue, head first.
    pub fn waiting(&self) -> impl Iterator<Item = &str> {
        self.waiting.iter().map(String::as_str)
    }

    /// 1-based table the client sits at.
    pub fn table_of(&self, client: &str) -> Option<usize> {
        self.seated_at.get(client).map(|idx| idx + 1)
    }

    /// Ticket currently open at a 1-based table.
    pub fn ticket_at(&self, table: usize) -> Option<&Ticket> {
        table
            .checked_sub(1)
            .and_then(|idx| self.seats.get(idx))
            .and_then(Option::as_ref)
    }

    pub fn occupied_tables(&self) -> usize {
        self.seated_at.len()
    }

    pub fn ledger(&self, table: usize) -> Option<&TableLedger> {
        table.checked_sub(1).and_then(|idx| self.ledger.get(idx))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Apply one incoming event. The event is echoed first, then whatever
    /// the club produces in response.
    pub fn apply(&mut self, event: &Event) {
        self.records.push(Record::Incoming(event.clone()));

        let outcome = match event.kind {
            EventKind::Arrive => self.arrive(&event.client, event.at),
            EventKind::SeatAt(table) => self.seat(&event.client, table, event.at),
            EventKind::JoinWaiting => self.join_waiting(&event.client),
            EventKind::Leave => self.leave(&event.client, event.at),
        };

        if let Err(reason) = outcome {
            debug!(client = %event.client, at = %event.at, ?reason, "event rejected");
            match reason {
                Rejection::QueueFull => {
                    self.records.push(Record::ForcedLeave {
                        at: event.at,
                        client: event.client.clone(),
                    });
                    self.depart(&event.client, event.at);
                }
                other => self.records.push(Record::Rejected {
                    at: event.at,
                    reason: other,
                }),
            }
        }
    }

    /// Evict everyone still inside at closing time, in name order, and
    /// settle every table.
    pub fn close_day(mut self) -> DayReport {
        let closes_at = self.config.closes_at;

        // BTreeSet iteration is already lexicographic.
        let remaining: Vec<String> = self.present.iter().cloned().collect();
        for client in remaining {
            self.depart(&client, closes_at);
            self.records.push(Record::ForcedLeave {
                at: closes_at,
                client,
            });
        }

        let tables: Vec<TableSettlement> = self
            .ledger
            .iter()
            .enumerate()
            .map(|(idx, entry)| TableSettlement {
                table: idx + 1,
                proceeds: entry.proceeds,
                occupied: entry.occupied,
            })
            .collect();

        info!(
            tables = tables.len(),
            proceeds = tables
                .iter()
                .fold(0u64, |acc, t| acc.saturating_add(t.proceeds)),
            records = self.records.len(),
            "day settled"
        );

        DayReport {
            opens_at: self.config.opens_at,
            records: self.records,
            closes_at,
            tables,
        }
    }

    // ------------------------------------------------
    // Transitions
    // ------------------------------------------------

    fn arrive(&mut self, client: &str, at: NaiveTime) -> Result<(), Rejection> {
        if self.present.contains(client) {
            return Err(Rejection::DuplicatePresence);
        }
        if !self.config.is_open_at(at) {
            return Err(Rejection::OutsideOperatingHours);
        }

        self.present.insert(client.to_string());
        debug!(client, at = %at, "client arrived");
        Ok(())
    }

    fn seat(&mut self, client: &str, table: usize, at: NaiveTime) -> Result<(), Rejection> {
        if !self.present.contains(client) {
            return Err(Rejection::ClientNotPresent);
        }

        let Some(idx) = table.checked_sub(1).filter(|idx| *idx < self.seats.len()) else {
            warn!(client, table, "seat request for a table the club does not have");
            return Err(Rejection::TableOccupied);
        };
        if self.seats[idx].is_some() {
            return Err(Rejection::TableOccupied);
        }

        // A reseat frees the old table without offering it to the queue.
        if let Some(old) = self.seated_at.get(client).copied() {
            self.close_ticket(old, at);
        }

        self.waiting.retain(|name| name != client);
        self.open_ticket(idx, client, at);
        Ok(())
    }

    fn join_waiting(&mut self, client: &str) -> Result<(), Rejection> {
        if !self.present.contains(client) {
            return Err(Rejection::ClientNotPresent);
        }
        if self.occupied_tables() < self.config.table_count {
            return Err(Rejection::TableAvailable);
        }

        if self.seated_at.contains_key(client) || self.waiting.iter().any(|w| w == client) {
            debug!(client, "already seated or waiting, queue unchanged");
            return Ok(());
        }

        if self.waiting.len() > self.config.table_count {
            return Err(Rejection::QueueFull);
        }

        self.waiting.push_back(client.to_string());
        debug!(client, position = self.waiting.len(), "client joined the queue");
        Ok(())
    }

    fn leave(&mut self, client: &str, at: NaiveTime) -> Result<(), Rejection> {
        if !self.present.contains(client) {
            return Err(Rejection::ClientNotPresent);
        }

        let Some(freed) = self.depart(client, at) else {
            return Ok(());
        };

        if let Some(next) = self.waiting.pop_front() {
            self.open_ticket(freed, &next, at);
            self.records.push(Record::Seated {
                at,
                client: next,
                table: freed + 1,
            });
        }
        Ok(())
    }

    // ------------------------------------------------
    // Helpers
    // ------------------------------------------------

    /// Remove a client from the club entirely. Returns the index of the
    /// table they freed, if they were seated.
    fn depart(&mut self, client: &str, at: NaiveTime) -> Option<usize> {
        self.present.remove(client);
        self.waiting.retain(|name| name != client);

        let table = self.seated_at.get(client).copied()?;
        self.close_ticket(table, at);
        debug!(client, table = table + 1, at = %at, "client left");
        Some(table)
    }

    fn open_ticket(&mut self, idx: usize, client: &str, at: NaiveTime) {
        self.seats[idx] = Some(Ticket::new(client, at));
        self.seated_at.insert(client.to_string(), idx);
        debug!(client, table = idx + 1, at = %at, "ticket opened");
    }

    fn close_ticket(&mut self, idx: usize, at: NaiveTime) {
        let Some(ticket) = self.seats[idx].take() else {
            return;
        };
        self.seated_at.remove(&ticket.client);

        let spent = ticket.duration_until(at);
        let charged = billing::charge(spent, self.config.hourly_rate);

        let entry = &mut self.ledger[idx];
        entry.occupied += spent;
        entry.proceeds = entry.proceeds.saturating_add(charged);

        debug!(
            client = %ticket.client,
            table = idx + 1,
            minutes = spent.num_minutes(),
            charged,
            "ticket closed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::simulate;
    use crate::utils::time::hm;

    fn day(tables: usize, rate: u64) -> DayConfig {
        DayConfig::new(tables, hm(9, 0), hm(19, 0), rate).unwrap()
    }

    fn rendered(report: &DayReport) -> Vec<String> {
        report.records.iter().map(ToString::to_string).collect()
    }

    fn assert_consistent(club: &Club) {
        // one client per table, one table per client
        let mut seen = BTreeSet::new();
        for (idx, seat) in club.seats.iter().enumerate() {
            if let Some(ticket) = seat {
                assert!(seen.insert(ticket.client.clone()), "{} seated twice", ticket.client);
                assert_eq!(club.seated_at.get(&ticket.client), Some(&idx));
                assert!(club.present.contains(&ticket.client));
            }
        }
        assert_eq!(seen.len(), club.seated_at.len());

        // queue holds present, unseated, distinct clients
        let mut queued = BTreeSet::new();
        for name in &club.waiting {
            assert!(queued.insert(name.clone()), "{name} queued twice");
            assert!(club.present.contains(name));
            assert!(!club.seated_at.contains_key(name));
        }
    }

    #[test]
    fn waiting_client_is_promoted_and_evicted_at_close() {
        let events = vec![
            Event::arrive(hm(9, 0), "client1"),
            Event::seat_at(hm(9, 0), "client1", 1),
            Event::arrive(hm(9, 10), "client2"),
            Event::join_waiting(hm(9, 10), "client2"),
            Event::leave(hm(10, 30), "client1"),
        ];

        let report = simulate(day(1, 10), &events);

        assert_eq!(
            rendered(&report),
            vec![
                "09:00 1 client1",
                "09:00 2 client1 1",
                "09:10 1 client2",
                "09:10 3 client2",
                "10:30 4 client1",
                "10:30 12 client2 1",
                "19:00 11 client2",
            ]
        );

        let table = report.table(1).unwrap();
        assert_eq!(table.proceeds, 110);
        assert_eq!(table.occupied, TimeDelta::hours(10));
        assert_eq!(table.to_string(), "1 110 10:00");
    }

    #[test]
    fn second_arrival_is_rejected() {
        let events = vec![
            Event::arrive(hm(9, 0), "client1"),
            Event::arrive(hm(9, 5), "client1"),
        ];
        let report = simulate(day(2, 10), &events);
        assert_eq!(report.records[2].to_string(), "09:05 13 YouShallNotPass");
    }

    #[test]
    fn arrival_outside_hours_is_rejected() {
        let events = vec![
            Event::arrive(hm(8, 0), "client1"),
            Event::arrive(hm(19, 1), "client2"),
            Event::arrive(hm(19, 0), "client3"),
        ];

        let mut club = Club::new(day(1, 10));
        for ev in &events {
            club.apply(ev);
        }

        assert_eq!(club.records()[1].to_string(), "08:00 13 NotOpenYet");
        assert_eq!(club.records()[3].to_string(), "19:01 13 NotOpenYet");
        assert_eq!(club.present().collect::<Vec<_>>(), vec!["client3"]);
    }

    #[test]
    fn duplicate_check_comes_before_hours_check() {
        let mut club = Club::new(day(1, 10));
        club.apply(&Event::arrive(hm(9, 0), "anna"));
        club.apply(&Event::arrive(hm(20, 0), "anna"));
        assert_eq!(
            club.records().last(),
            Some(&Record::Rejected {
                at: hm(20, 0),
                reason: Rejection::DuplicatePresence
            })
        );
    }

    #[test]
    fn unknown_client_cannot_act() {
        let mut club = Club::new(day(1, 10));
        club.apply(&Event::seat_at(hm(9, 0), "ghost", 1));
        club.apply(&Event::join_waiting(hm(9, 1), "ghost"));
        club.apply(&Event::leave(hm(9, 2), "ghost"));

        let tags: Vec<String> = club.records().iter().map(ToString::to_string).collect();
        assert_eq!(
            tags,
            vec![
                "09:00 2 ghost 1",
                "09:00 13 ClientUnknown",
                "09:01 3 ghost",
                "09:01 13 ClientUnknown",
                "09:02 4 ghost",
                "09:02 13 ClientUnknown",
            ]
        );
    }

    #[test]
    fn busy_table_is_refused_even_for_its_own_occupant() {
        let mut club = Club::new(day(2, 10));
        club.apply(&Event::arrive(hm(9, 0), "anna"));
        club.apply(&Event::arrive(hm(9, 0), "bob"));
        club.apply(&Event::seat_at(hm(9, 1), "anna", 1));
        club.apply(&Event::seat_at(hm(9, 2), "bob", 1));
        club.apply(&Event::seat_at(hm(9, 3), "anna", 1));

        let rejected = club
            .records()
            .iter()
            .filter(|r| {
                matches!(r, Record::Rejected { reason: Rejection::TableOccupied, .. })
            })
            .count();
        assert_eq!(rejected, 2);
        assert_eq!(club.table_of("anna"), Some(1));
        assert_eq!(club.table_of("bob"), None);
    }

    #[test]
    fn reseat_bills_the_old_table_and_leaves_it_empty() {
        let mut club = Club::new(day(3, 10));
        for name in ["anna", "bob", "carl", "dana"] {
            club.apply(&Event::arrive(hm(9, 0), name));
        }
        club.apply(&Event::seat_at(hm(9, 0), "anna", 1));
        club.apply(&Event::seat_at(hm(9, 0), "bob", 2));
        club.apply(&Event::seat_at(hm(9, 0), "carl", 3));
        club.apply(&Event::join_waiting(hm(9, 0), "dana"));

        club.apply(&Event::leave(hm(10, 0), "carl"));
        assert_eq!(club.table_of("dana"), Some(3));

        club.apply(&Event::leave(hm(11, 0), "dana"));
        assert!(club.ticket_at(3).is_none());

        club.apply(&Event::seat_at(hm(11, 30), "anna", 3));

        // 2h30m on table 1 -> 3 paid hours, nobody takes the freed table
        let t1 = club.ledger(1).unwrap();
        assert_eq!(t1.occupied, TimeDelta::minutes(150));
        assert_eq!(t1.proceeds, 30);
        assert!(club.ticket_at(1).is_none());
        assert_eq!(club.table_of("anna"), Some(3));
        assert_eq!(club.ticket_at(3).map(|t| t.started_at), Some(hm(11, 30)));
        assert_consistent(&club);
    }

    #[test]
    fn joining_with_a_free_table_is_refused() {
        let mut club = Club::new(day(2, 10));
        club.apply(&Event::arrive(hm(9, 0), "anna"));
        club.apply(&Event::seat_at(hm(9, 0), "anna", 1));
        club.apply(&Event::arrive(hm(9, 1), "bob"));
        club.apply(&Event::join_waiting(hm(9, 2), "bob"));

        assert_eq!(
            club.records().last().map(ToString::to_string).as_deref(),
            Some("09:02 13 ICanWaitNoLonger!")
        );
        assert_eq!(club.waiting().count(), 0);
        assert!(club.is_present("bob"));
    }

    #[test]
    fn overflowing_queue_sends_the_client_home() {
        let mut club = Club::new(day(1, 10));
        club.apply(&Event::arrive(hm(9, 0), "seated"));
        club.apply(&Event::seat_at(hm(9, 0), "seated", 1));

        // table_count + 1 clients fit in the queue
        for name in ["w1", "w2"] {
            club.apply(&Event::arrive(hm(9, 5), name));
            club.apply(&Event::join_waiting(hm(9, 5), name));
        }
        assert_eq!(club.waiting().collect::<Vec<_>>(), vec!["w1", "w2"]);

        club.apply(&Event::arrive(hm(9, 10), "w3"));
        club.apply(&Event::join_waiting(hm(9, 10), "w3"));

        assert_eq!(
            club.records().last(),
            Some(&Record::ForcedLeave {
                at: hm(9, 10),
                client: "w3".into()
            })
        );
        assert!(!club.is_present("w3"));
        assert_eq!(club.waiting().count(), 2);
        assert_consistent(&club);
    }

    #[test]
    fn unseated_departure_promotes_nobody() {
        let mut club = Club::new(day(1, 10));
        for name in ["anna", "bob", "carl"] {
            club.apply(&Event::arrive(hm(9, 0), name));
        }
        club.apply(&Event::seat_at(hm(9, 0), "anna", 1));
        club.apply(&Event::join_waiting(hm(9, 1), "bob"));
        club.apply(&Event::join_waiting(hm(9, 2), "carl"));

        club.apply(&Event::leave(hm(9, 30), "bob"));
        assert_eq!(club.waiting().collect::<Vec<_>>(), vec!["carl"]);
        assert_eq!(club.table_of("anna"), Some(1));
        assert!(!club.records().iter().any(|r| matches!(r, Record::Seated { .. })));
    }

    #[test]
    fn rejoining_the_queue_is_a_no_op() {
        let mut club = Club::new(day(1, 10));
        club.apply(&Event::arrive(hm(9, 0), "anna"));
        club.apply(&Event::seat_at(hm(9, 0), "anna", 1));
        club.apply(&Event::arrive(hm(9, 0), "bob"));
        club.apply(&Event::join_waiting(hm(9, 1), "bob"));
        club.apply(&Event::join_waiting(hm(9, 2), "bob"));
        club.apply(&Event::join_waiting(hm(9, 3), "anna"));

        assert_eq!(club.waiting().collect::<Vec<_>>(), vec!["bob"]);
        assert_eq!(club.records().len(), 6);
        assert_consistent(&club);
    }

    #[test]
    fn end_of_day_evicts_in_name_order() {
        let events = vec![
            Event::arrive(hm(9, 0), "zoe"),
            Event::arrive(hm(9, 0), "adam"),
            Event::arrive(hm(9, 0), "mia"),
            Event::seat_at(hm(9, 0), "zoe", 2),
            Event::seat_at(hm(17, 30), "adam", 1),
        ];
        let report = simulate(day(2, 7), &events);

        let tail: Vec<String> = rendered(&report).into_iter().skip(events.len()).collect();
        assert_eq!(tail, vec!["19:00 11 adam", "19:00 11 mia", "19:00 11 zoe"]);

        // adam: 1h30 -> 2h, zoe: 10h
        assert_eq!(report.table(1).unwrap().proceeds, 14);
        assert_eq!(report.table(2).unwrap().proceeds, 70);
        assert_eq!(report.table(2).unwrap().occupied, TimeDelta::hours(10));
        assert_eq!(report.total_proceeds(), 84);
    }

    #[test]
    fn eviction_does_not_promote_from_the_queue() {
        let events = vec![
            Event::arrive(hm(9, 0), "a"),
            Event::seat_at(hm(9, 0), "a", 1),
            Event::arrive(hm(9, 0), "b"),
            Event::join_waiting(hm(9, 0), "b"),
        ];
        let report = simulate(day(1, 10), &events);
        assert!(!report.records.iter().any(|r| matches!(r, Record::Seated { .. })));
        assert_eq!(report.records.len(), 6);
        assert_eq!(report.table(1).unwrap().proceeds, 100);
    }

    #[test]
    fn billing_rounds_each_session_separately() {
        // two 30 minute sessions on one table: 2 paid hours, 1h occupied
        let events = vec![
            Event::arrive(hm(9, 0), "anna"),
            Event::seat_at(hm(9, 0), "anna", 1),
            Event::leave(hm(9, 30), "anna"),
            Event::arrive(hm(10, 0), "bob"),
            Event::seat_at(hm(10, 0), "bob", 1),
            Event::leave(hm(10, 30), "bob"),
        ];
        let report = simulate(day(1, 10), &events);
        let t = report.table(1).unwrap();
        assert_eq!(t.proceeds, 20);
        assert_eq!(t.occupied, TimeDelta::hours(1));
    }

    #[test]
    fn zero_length_session_is_free() {
        let events = vec![
            Event::arrive(hm(9, 0), "anna"),
            Event::seat_at(hm(9, 15), "anna", 1),
            Event::leave(hm(9, 15), "anna"),
        ];
        let report = simulate(day(1, 10), &events);
        assert_eq!(report.table(1).unwrap().proceeds, 0);
        assert_eq!(report.table(1).unwrap().to_string(), "1 0 00:00");
    }

    #[test]
    fn ledgers_never_shrink() {
        let events = vec![
            Event::arrive(hm(9, 0), "a"),
            Event::arrive(hm(9, 0), "b"),
            Event::arrive(hm(9, 0), "c"),
            Event::seat_at(hm(9, 0), "a", 1),
            Event::seat_at(hm(9, 10), "b", 2),
            Event::join_waiting(hm(9, 20), "c"),
            Event::seat_at(hm(10, 0), "a", 2),
            Event::leave(hm(11, 0), "b"),
            Event::seat_at(hm(11, 5), "a", 2),
            Event::leave(hm(12, 40), "a"),
            Event::leave(hm(13, 0), "c"),
        ];

        let mut club = Club::new(day(2, 5));
        let mut previous = vec![TableLedger::default(); 2];
        for ev in &events {
            club.apply(ev);
            assert_consistent(&club);
            for (table, before) in previous.iter_mut().enumerate() {
                let now = *club.ledger(table + 1).unwrap();
                assert!(now.occupied >= before.occupied);
                assert!(now.proceeds >= before.proceeds);
                *before = now;
            }
        }
    }

    #[test]
    fn huge_rate_saturates_instead_of_overflowing() {
        let config = DayConfig::new(2, hm(9, 0), hm(19, 0), u64::MAX).unwrap();
        let events = vec![
            Event::arrive(hm(9, 0), "a"),
            Event::seat_at(hm(9, 0), "a", 1),
            Event::leave(hm(9, 30), "a"),
            Event::arrive(hm(10, 0), "b"),
            Event::seat_at(hm(10, 0), "b", 1),
            Event::leave(hm(10, 30), "b"),
            Event::arrive(hm(11, 0), "c"),
            Event::seat_at(hm(11, 0), "c", 2),
        ];
        let report = simulate(config, &events);

        assert_eq!(report.table(1).unwrap().proceeds, u64::MAX);
        assert_eq!(report.table(1).unwrap().occupied, TimeDelta::hours(1));
        assert_eq!(report.table(2).unwrap().proceeds, u64::MAX);
        assert_eq!(report.total_proceeds(), u64::MAX);
    }

    #[test]
    fn seating_after_closing_is_not_billed() {
        let events = vec![
            Event::arrive(hm(18, 0), "late"),
            Event::seat_at(hm(19, 30), "late", 1),
        ];
        let report = simulate(day(1, 10), &events);

        assert_eq!(
            report.records.last(),
            Some(&Record::ForcedLeave {
                at: hm(19, 0),
                client: "late".into()
            })
        );
        let table = report.table(1).unwrap();
        assert_eq!(table.occupied, TimeDelta::zero());
        assert_eq!(table.proceeds, 0);
        assert_eq!(table.to_string(), "1 0 00:00");
    }

    #[test]
    fn same_input_gives_same_report() {
        let events = vec![
            Event::arrive(hm(9, 0), "x"),
            Event::arrive(hm(9, 1), "y"),
            Event::seat_at(hm(9, 2), "x", 1),
            Event::join_waiting(hm(9, 3), "y"),
            Event::leave(hm(12, 0), "x"),
        ];
        let first = simulate(day(1, 12), &events);
        let second = simulate(day(1, 12), &events);
        assert_eq!(first, second);
    }
}
