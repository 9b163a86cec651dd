//! Holiday event model and identity derivation.

use chrono::{DateTime, Days, NaiveDate, Utc};
use sha2::{Digest, Sha256};

use crate::diagnostics::Diagnostics;

/// One all-day holiday, as stored in the calendar.
///
/// Events loaded from a pre-existing file may lack a uid or stamp; events
/// produced by [`build_event`] always carry both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayEvent {
    pub uid: Option<String>,
    pub start: NaiveDate,
    /// Exclusive end, the day after `start` for built events.
    pub end: NaiveDate,
    pub stamp: Option<DateTime<Utc>>,
    pub summary: String,
}

/// Identity digest for a holiday: sha256 over the ISO date concatenated with
/// the description, hex-encoded. The stamp stays out of the digest so a
/// rebuilt event matches what an earlier run stored.
pub fn make_uid(date: NaiveDate, description: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.format("%Y-%m-%d").to_string());
    hasher.update(description);
    hex::encode(hasher.finalize())
}

/// Build the event for one holiday. `stamp` is stored as given; it never
/// influences the uid.
pub fn build_event(date: NaiveDate, description: &str, stamp: DateTime<Utc>) -> HolidayEvent {
    HolidayEvent {
        uid: Some(make_uid(date, description)),
        start: date,
        end: date + Days::new(1),
        stamp: Some(stamp),
        summary: description.to_string(),
    }
}

/// The authoritative identity of a stored event, recomputed from its date and
/// summary. A stored uid that disagrees is reported as drift and overridden.
pub fn event_uid(event: &HolidayEvent, diag: &dyn Diagnostics) -> String {
    let uid = make_uid(event.start, &event.summary);
    if let Some(stored) = &event.uid {
        if *stored != uid {
            diag.warning(&format!(
                "uid for {} is wrong, was {stored} should be {uid}",
                event.summary
            ));
        }
    }
    uid
}
