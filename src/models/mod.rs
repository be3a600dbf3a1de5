pub mod day_config;
pub mod event;
pub mod record;
pub mod report;
pub mod ticket;

pub use day_config::DayConfig;
pub use event::{Event, EventKind};
pub use record::{Record, Rejection};
pub use report::{DayReport, TableSettlement};
pub use ticket::Ticket;
