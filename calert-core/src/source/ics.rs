//! iCalendar adapter built on the icalendar crate's parser.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use icalendar::parser::{Component, Property, read_calendar, unfold};
use icalendar::{CalendarDateTime, DatePerhapsTime};

use crate::error::{CalertError, CalertResult};
use crate::event::CanonicalEvent;

const FORMAT: &str = "ICS";

/// Parse iCalendar bytes into canonical events, one per VEVENT, in file order.
pub fn parse_events(bytes: &[u8]) -> CalertResult<Vec<CanonicalEvent>> {
    let content = std::str::from_utf8(bytes)
        .map_err(|e| CalertError::decode(FORMAT, format!("input is not UTF-8: {e}")))?;
    let content = content.trim_start_matches('\u{feff}');

    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| CalertError::decode(FORMAT, e))?;

    let mut vevents = Vec::new();
    for component in &calendar.components {
        collect_vevents(component, &mut vevents);
    }

    vevents.into_iter().map(to_canonical).collect()
}

/// Depth-first walk collecting every VEVENT, wherever it is nested.
fn collect_vevents<'a>(component: &'a Component<'a>, out: &mut Vec<&'a Component<'a>>) {
    if component.name == "VEVENT" {
        out.push(component);
        return;
    }
    for child in &component.components {
        collect_vevents(child, out);
    }
}

fn to_canonical(vevent: &Component) -> CalertResult<CanonicalEvent> {
    let text = |name: &str| {
        vevent
            .find_prop(name)
            .map(|p| unescape_text(p.val.as_ref()))
            .unwrap_or_default()
    };

    let dtstart = required_time(vevent, "DTSTART")?;
    let dtstamp = required_time(vevent, "DTSTAMP")?;
    let dtend = match vevent.find_prop("DTEND") {
        Some(prop) => to_naive(prop, "DTEND")?,
        None => {
            let duration = vevent.find_prop("DURATION").ok_or_else(|| {
                CalertError::decode(FORMAT, "event has neither DTEND nor DURATION")
            })?;
            dtstart + parse_duration(duration.val.as_ref())?
        }
    };

    Ok(CanonicalEvent::new(
        text("SUMMARY"),
        dtstart,
        dtend,
        dtstamp,
        text("LOCATION"),
        text("STATUS"),
    ))
}

fn required_time(vevent: &Component, name: &str) -> CalertResult<NaiveDateTime> {
    let prop = vevent
        .find_prop(name)
        .ok_or_else(|| CalertError::decode(FORMAT, format!("event is missing {name}")))?;
    to_naive(prop, name)
}

/// Wall-clock value of a date or date-time property. Zoned values keep
/// their local time; dates become midnight.
fn to_naive(prop: &Property, name: &str) -> CalertResult<NaiveDateTime> {
    let value = DatePerhapsTime::try_from(prop).map_err(|_| {
        CalertError::decode(
            FORMAT,
            format!("invalid {name} value '{}'", prop.val.as_ref()),
        )
    })?;

    Ok(match value {
        DatePerhapsTime::Date(date) => date.and_time(NaiveTime::MIN),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => dt.naive_utc(),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => naive,
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, .. }) => date_time,
    })
}

/// Parse a DURATION value (P1DT2H, PT30M, ...)
fn parse_duration(value: &str) -> CalertResult<Duration> {
    let invalid = || CalertError::decode(FORMAT, format!("invalid DURATION value '{value}'"));

    if value.starts_with('-') {
        return Err(invalid());
    }
    let duration = iso8601::duration(value.trim_start_matches('+')).map_err(|_| invalid())?;
    let std_duration: std::time::Duration = duration.into();
    Duration::from_std(std_duration).map_err(|_| invalid())
}

/// Undo RFC 5545 TEXT escaping.
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
