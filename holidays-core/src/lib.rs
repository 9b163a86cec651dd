//! Extraction and idempotent merging for the Caltech holiday calendar.
//!
//! The binary crate wires fetching, CLI, and logging around this library:
//! [`extract`](extract::extract) pulls dated holidays out of the parsed page,
//! [`event`] derives stable identities for them, and [`merge`] folds freshly
//! built events into a [`HolidayCalendar`] without ever duplicating an
//! observance, no matter how often the page is re-scraped.

pub mod calendar;
pub mod diagnostics;
pub mod dom;
pub mod error;
pub mod event;
pub mod extract;
pub mod ics;
pub mod merge;

pub use calendar::HolidayCalendar;
pub use error::{HolidayError, HolidayResult};
