//! The on-disk holiday calendar: load-or-create, merge target, single write.

use std::path::Path;

use crate::diagnostics::Diagnostics;
use crate::error::HolidayResult;
use crate::event::HolidayEvent;
use crate::ics;

/// iCalendar format version written to every output file.
pub const VERSION: &str = "2.0";

/// Fixed producer identifier for files written by this tool.
pub const PRODID: &str = "ghic.org:caltech_holidays";

/// Ordered collection of holiday events backing one .ics file.
///
/// Mutated only by appending unique events; existing entries are never
/// reordered, altered, or removed.
#[derive(Debug, Default)]
pub struct HolidayCalendar {
    pub events: Vec<HolidayEvent>,
}

impl HolidayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the calendar at `path` when the file exists, otherwise start
    /// empty. The loaded calendar becomes the accumulator for this run's
    /// merges.
    pub fn load_or_create(path: &Path, diag: &dyn Diagnostics) -> HolidayResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            return ics::parse_calendar(&content, diag);
        }
        Ok(Self::new())
    }

    /// Serialize to iCalendar text.
    pub fn to_ics(&self) -> String {
        ics::generate_ics(self)
    }

    /// Write the serialized calendar to `path` in one shot.
    pub fn save(&self, path: &Path) -> HolidayResult<()> {
        std::fs::write(path, self.to_ics())?;
        Ok(())
    }

    /// Serialized text with CRLF normalized away, for terminal display.
    pub fn display(&self) -> String {
        self.to_ics().replace("\r\n", "\n").trim().to_string()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
