//! Idempotent merging of freshly built events into a calendar.

use std::collections::HashSet;

use crate::calendar::HolidayCalendar;
use crate::diagnostics::Diagnostics;
use crate::event::{HolidayEvent, event_uid};

/// Identities of every stored event that carries a uid field. Events without
/// one cannot be matched and are left out of the set.
pub fn known_uids(calendar: &HolidayCalendar, diag: &dyn Diagnostics) -> HashSet<String> {
    calendar
        .events
        .iter()
        .filter(|event| event.uid.is_some())
        .map(|event| event_uid(event, diag))
        .collect()
}

/// Append `event` unless an event with the same identity is already stored.
/// Returns whether the event was inserted.
///
/// The known set is recomputed on every call; the calendar stays in the low
/// hundreds of entries, so correctness is worth the rescan.
pub fn add_unique(
    calendar: &mut HolidayCalendar,
    event: HolidayEvent,
    diag: &dyn Diagnostics,
) -> bool {
    let known = known_uids(calendar, diag);
    let uid = event_uid(&event, diag);

    if known.contains(&uid) {
        diag.debug(&format!("already have event: {}", event.summary));
        return false;
    }
    calendar.events.push(event);
    true
}
