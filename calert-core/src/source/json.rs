//! JSON adapter for `{"events": [...]}` exports.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::error::{CalertError, CalertResult};
use crate::event::CanonicalEvent;

const FORMAT: &str = "JSON";

/// Timestamp format used on the wire, e.g. `20240102T090000Z`.
pub const WIRE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

#[derive(Debug, Deserialize)]
struct JsonCalendar {
    events: Vec<JsonEvent>,
}

#[derive(Debug, Deserialize)]
struct JsonEvent {
    summary: String,
    dtstart: String,
    dtend: String,
    dtstamp: String,
    location: String,
    #[serde(default)]
    status: Option<String>,
}

/// Parse a JSON export into canonical events, keeping array order.
pub fn parse_events(bytes: &[u8]) -> CalertResult<Vec<CanonicalEvent>> {
    let calendar: JsonCalendar =
        serde_json::from_slice(bytes).map_err(|e| CalertError::decode(FORMAT, e.to_string()))?;

    calendar
        .events
        .into_iter()
        .enumerate()
        .map(|(index, event)| to_canonical(index, event))
        .collect()
}

fn to_canonical(index: usize, event: JsonEvent) -> CalertResult<CanonicalEvent> {
    Ok(CanonicalEvent::new(
        event.summary,
        parse_wire_time(index, "dtstart", &event.dtstart)?,
        parse_wire_time(index, "dtend", &event.dtend)?,
        parse_wire_time(index, "dtstamp", &event.dtstamp)?,
        event.location,
        event.status.unwrap_or_default(),
    ))
}

fn parse_wire_time(index: usize, key: &str, value: &str) -> CalertResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, WIRE_FORMAT).map_err(|e| {
        CalertError::decode(
            FORMAT,
            format!("events[{index}].{key}: '{value}' is not {WIRE_FORMAT} ({e})"),
        )
    })
}
