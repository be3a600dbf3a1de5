pub mod colors;
pub mod time;

pub use time::{format_duration, format_time, parse_time};
