//! Loading the day's event log from text.

pub mod parser;

pub use parser::{EventLog, load_log, parse_log};
