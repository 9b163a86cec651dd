//! Error types for the holiday scraper.

use thiserror::Error;

/// Errors that can occur while extracting holidays or persisting the calendar.
#[derive(Error, Debug)]
pub enum HolidayError {
    #[error("page layout changed: no table block follows the {0} heading")]
    MissingTableBlock(String),

    #[error("page layout changed: observance block holds {0} tables, expected 1")]
    TableCount(usize),

    #[error("calendar parse error: {0}")]
    CalendarParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for holiday operations.
pub type HolidayResult<T> = Result<T, HolidayError>;
