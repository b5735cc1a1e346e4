//! Source-neutral event types.
//!
//! Every source adapter converts its records into [`CanonicalEvent`], and the
//! rule evaluator and alert renderer work exclusively with it.

use std::fmt;

use chrono::{NaiveDateTime, Timelike};

/// Display format shared by every timestamp field (e.g. `02-01-24 03:00:00`).
pub const DISPLAY_FORMAT: &str = "%d-%m-%y %H:%M:%S";

/// A local naive date-time, truncated to whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn new(datetime: NaiveDateTime) -> Self {
        Timestamp(datetime.with_nanosecond(0).unwrap_or(datetime))
    }

    /// Parse a timestamp written in [`DISPLAY_FORMAT`].
    pub fn parse_display(s: &str) -> Option<Self> {
        NaiveDateTime::parse_from_str(s, DISPLAY_FORMAT)
            .ok()
            .map(Timestamp::new)
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(datetime: NaiveDateTime) -> Self {
        Timestamp::new(datetime)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

/// A calendar event after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalEvent {
    pub summary: String,
    pub dtstart: Timestamp,
    pub dtend: Timestamp,
    pub dtstamp: Timestamp,
    /// Empty when the source has no location
    pub location: String,
    /// Lowercase; empty when the source has no status
    pub status: String,
}

/// The fields shown in an alert, in the order they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Summary,
    Start,
    End,
    Stamp,
    Location,
}

impl Field {
    pub const RENDER_ORDER: [Field; 5] = [
        Field::Summary,
        Field::Start,
        Field::End,
        Field::Stamp,
        Field::Location,
    ];

    /// Human-readable label printed before the field value
    pub fn label(self) -> &'static str {
        match self {
            Field::Summary => "Summary is",
            Field::Start => "Start time is",
            Field::End => "End time is",
            Field::Stamp => "Time stamp is",
            Field::Location => "Location is",
        }
    }
}

impl CanonicalEvent {
    pub fn new(
        summary: impl Into<String>,
        dtstart: impl Into<Timestamp>,
        dtend: impl Into<Timestamp>,
        dtstamp: impl Into<Timestamp>,
        location: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        CanonicalEvent {
            summary: summary.into(),
            dtstart: dtstart.into(),
            dtend: dtend.into(),
            dtstamp: dtstamp.into(),
            location: location.into(),
            status: status.into().to_lowercase(),
        }
    }

    /// Display text of a field, or `None` when it is empty.
    pub fn field(&self, field: Field) -> Option<String> {
        let value = match field {
            Field::Summary => self.summary.clone(),
            Field::Start => self.dtstart.to_string(),
            Field::End => self.dtend.to_string(),
            Field::Stamp => self.dtstamp.to_string(),
            Field::Location => self.location.clone(),
        };
        if value.is_empty() { None } else { Some(value) }
    }
}

impl fmt::Display for CanonicalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.dtstart, self.summary)?;
        if !self.location.is_empty() {
            write!(f, " @ {}", self.location)?;
        }
        if !self.status.is_empty() {
            write!(f, " [{}]", self.status)?;
        }
        Ok(())
    }
}
