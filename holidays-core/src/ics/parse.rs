//! .ics parsing using the icalendar crate's parser.

use chrono::{DateTime, Days, NaiveDate, Utc};
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

use crate::calendar::HolidayCalendar;
use crate::diagnostics::Diagnostics;
use crate::error::{HolidayError, HolidayResult};
use crate::event::HolidayEvent;

/// Parse a stored calendar file back into the in-memory container.
///
/// Every VEVENT becomes a [`HolidayEvent`]. SUMMARY and DTSTART are required
/// for an event to participate in identity checks; a component missing either
/// is skipped with a warning. UID and DTSTAMP are carried when present.
pub fn parse_calendar(content: &str, diag: &dyn Diagnostics) -> HolidayResult<HolidayCalendar> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(HolidayError::CalendarParse)?;

    let mut events = Vec::new();
    for component in &calendar.components {
        if component.name != "VEVENT" {
            continue;
        }
        match parse_event(component) {
            Some(event) => events.push(event),
            None => diag.warning("skipping VEVENT without SUMMARY and DTSTART"),
        }
    }
    Ok(HolidayCalendar { events })
}

fn parse_event(vevent: &Component) -> Option<HolidayEvent> {
    let summary = vevent.find_prop("SUMMARY")?.val.to_string();
    let start = prop_date(vevent, "DTSTART")?;
    let end = prop_date(vevent, "DTEND").unwrap_or_else(|| start + Days::new(1));
    let uid = vevent.find_prop("UID").map(|prop| prop.val.to_string());
    let stamp = prop_stamp(vevent);

    Some(HolidayEvent {
        uid,
        start,
        end,
        stamp,
        summary,
    })
}

/// Date part of a DTSTART/DTEND property. Datetime values degrade to their
/// calendar date; these are all-day events.
fn prop_date(vevent: &Component, name: &str) -> Option<NaiveDate> {
    let prop = vevent.find_prop(name)?;
    match DatePerhapsTime::try_from(prop).ok()? {
        DatePerhapsTime::Date(date) => Some(date),
        DatePerhapsTime::DateTime(dt) => Some(match dt {
            CalendarDateTime::Floating(naive) => naive.date(),
            CalendarDateTime::Utc(utc) => utc.date_naive(),
            CalendarDateTime::WithTimezone { date_time, .. } => date_time.date(),
        }),
    }
}

fn prop_stamp(vevent: &Component) -> Option<DateTime<Utc>> {
    let prop = vevent.find_prop("DTSTAMP")?;
    match DatePerhapsTime::try_from(prop).ok()? {
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(utc)) => Some(utc),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => Some(naive.and_utc()),
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, .. }) => {
            Some(date_time.and_utc())
        }
        DatePerhapsTime::Date(date) => date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc()),
    }
}
