//! iCalendar (de)serialization for the holiday calendar.

mod generate;
mod parse;

pub use generate::generate_ics;
pub use parse::parse_calendar;
