//! Parsing for the `alert(d,h,min,sec)` lead-time rule.

use chrono::Duration;

use crate::error::{CalertError, CalertResult};
use crate::rules::LEAD_TIME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl Unit {
    /// Classify a unit token by substring. Order matters: "min" and "sec"
    /// are checked before the single letters they could be confused with.
    fn sniff(token: &str) -> Option<Unit> {
        if token.contains("min") {
            Some(Unit::Minutes)
        } else if token.contains("sec") {
            Some(Unit::Seconds)
        } else if token.contains('h') {
            Some(Unit::Hours)
        } else if token.contains('d') {
            Some(Unit::Days)
        } else {
            None
        }
    }

    fn duration(self, amount: i64) -> Option<Duration> {
        match self {
            Unit::Days => Duration::try_days(amount),
            Unit::Hours => Duration::try_hours(amount),
            Unit::Minutes => Duration::try_minutes(amount),
            Unit::Seconds => Duration::try_seconds(amount),
        }
    }
}

/// Sum the components of a lead-time value such as `1d,2h,30min`.
///
/// Each component is a run of digits immediately followed by a unit token.
/// Empty components are ignored, so an empty value is a zero lead time.
pub fn parse_lead_time(value: &str) -> CalertResult<Duration> {
    let invalid = |reason: String| CalertError::InvalidRule {
        name: LEAD_TIME.to_string(),
        value: value.to_string(),
        reason,
    };

    let mut total = Duration::zero();
    for component in value.split(',').map(str::trim) {
        if component.is_empty() {
            continue;
        }

        let digits_end = component
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(component.len());
        let (digits, token) = component.split_at(digits_end);

        if digits.is_empty() {
            return Err(invalid(format!("'{component}' does not start with a number")));
        }
        let unit = Unit::sniff(token)
            .ok_or_else(|| invalid(format!("'{component}' has no d, h, min or sec unit")))?;
        let amount: i64 = digits
            .parse()
            .map_err(|_| invalid(format!("'{component}' is too large")))?;

        total = unit
            .duration(amount)
            .and_then(|d| total.checked_add(&d))
            .ok_or_else(|| invalid(format!("'{component}' is too large")))?;
    }

    Ok(total)
}
