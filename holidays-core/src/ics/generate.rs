//! .ics generation.

use chrono::NaiveDate;
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

use crate::calendar::{HolidayCalendar, PRODID, VERSION};
use crate::event::HolidayEvent;

/// Serialize the calendar with its fixed metadata fields.
pub fn generate_ics(calendar: &HolidayCalendar) -> String {
    let mut cal = Calendar::new();
    for event in &calendar.events {
        cal.push(build_component(event));
    }
    let cal = cal.done();

    rewrite_metadata(&cal.to_string())
}

fn build_component(event: &HolidayEvent) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    if let Some(uid) = &event.uid {
        ics_event.uid(uid);
    }
    ics_event.summary(&event.summary);
    if let Some(stamp) = event.stamp {
        ics_event.add_property("DTSTAMP", stamp.format("%Y%m%dT%H%M%SZ").to_string());
    }
    add_date_property(&mut ics_event, "DTSTART", event.start);
    add_date_property(&mut ics_event, "DTEND", event.end);
    ics_event.done()
}

/// All-day events carry date-valued DTSTART/DTEND properties.
fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}

/// The icalendar crate stamps its own PRODID and a default CALSCALE; rewrite
/// the header so the file carries this tool's fixed metadata instead.
fn rewrite_metadata(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    for line in ics.lines() {
        if line.starts_with("VERSION:") {
            result.push_str(&format!("VERSION:{VERSION}\r\n"));
            continue;
        }
        if line.starts_with("PRODID:") {
            result.push_str(&format!("PRODID:{PRODID}\r\n"));
            continue;
        }
        if line == "CALSCALE:GREGORIAN" {
            continue;
        }
        result.push_str(line);
        result.push_str("\r\n");
    }
    result
}
