//! Rule evaluation against a single event.

use chrono::NaiveDateTime;

use crate::error::{CalertError, CalertResult};
use crate::event::CanonicalEvent;
use crate::rules::{CONTAINS, LEAD_TIME, LOCATION, RuleSet, STATUS, parse_lead_time};

/// Whether `event` satisfies every known rule in `rules`.
///
/// `location` and `status` compare case-insensitively (both sides lowercased),
/// `contains` is a case-sensitive substring test on the summary, and the
/// lead-time rule requires the event to start after `now` plus the configured
/// offsets. Unknown rule names are ignored.
pub fn matches(event: &CanonicalEvent, rules: &RuleSet, now: NaiveDateTime) -> CalertResult<bool> {
    if let Some(location) = rules.get(LOCATION)
        && event.location.to_lowercase() != location.to_lowercase()
    {
        return Ok(false);
    }

    if let Some(status) = rules.get(STATUS)
        && event.status.to_lowercase() != status.to_lowercase()
    {
        return Ok(false);
    }

    if let Some(needle) = rules.get(CONTAINS)
        && !event.summary.contains(needle)
    {
        return Ok(false);
    }

    if let Some(lead_time) = rules.get(LEAD_TIME) {
        let threshold = now
            .checked_add_signed(parse_lead_time(lead_time)?)
            .ok_or_else(|| CalertError::InvalidRule {
                name: LEAD_TIME.to_string(),
                value: lead_time.to_string(),
                reason: "lead time reaches past the supported date range".into(),
            })?;
        if event.dtstart.naive() <= threshold {
            return Ok(false);
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::event::Timestamp;
    use chrono::NaiveDate;

    fn jan_1() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn event(summary: &str, start: &str, location: &str, status: &str) -> CanonicalEvent {
        let start = Timestamp::parse_display(start).unwrap();
        CanonicalEvent::new(summary, start, start, start, location, status)
    }

    fn rules(pairs: &[(&str, &str)]) -> RuleSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_empty_rules_accept_everything() {
        let e = event("", "01-01-20 00:00:00", "", "");
        assert!(matches(&e, &RuleSet::new(), jan_1()).unwrap());
    }

    #[test]
    fn test_location_is_case_insensitive() {
        let r = rules(&[(LOCATION, "room a")]);
        let room_a = event("Sync", "02-01-24 09:00:00", "Room A", "");
        let room_b = event("Sync", "02-01-24 09:00:00", "Room B", "");

        assert!(matches(&room_a, &r, jan_1()).unwrap());
        assert!(!matches(&room_b, &r, jan_1()).unwrap());
    }

    #[test]
    fn test_status_is_case_insensitive() {
        let r = rules(&[(STATUS, "confirmed")]);
        let confirmed = event("Sync", "02-01-24 09:00:00", "", "CONFIRMED");
        let tentative = event("Sync", "02-01-24 09:00:00", "", "tentative");

        assert!(matches(&confirmed, &r, jan_1()).unwrap());
        assert!(!matches(&tentative, &r, jan_1()).unwrap());
    }

    #[test]
    fn test_uppercase_rule_values_still_match() {
        let location = rules(&[(LOCATION, "Room A")]);
        let status = rules(&[(STATUS, "CONFIRMED")]);
        let e = event("Sync", "02-01-24 09:00:00", "room a", "CONFIRMED");
        let other = event("Sync", "02-01-24 09:00:00", "Room B", "tentative");

        assert!(matches(&e, &location, jan_1()).unwrap());
        assert!(matches(&e, &status, jan_1()).unwrap());
        assert!(!matches(&other, &location, jan_1()).unwrap());
        assert!(!matches(&other, &status, jan_1()).unwrap());
    }

    #[test]
    fn test_contains_is_case_sensitive() {
        let r = rules(&[(CONTAINS, "Standup")]);
        let exact = event("Daily Standup", "02-01-24 09:00:00", "", "");
        let lower = event("daily standup", "02-01-24 09:00:00", "", "");

        assert!(matches(&exact, &r, jan_1()).unwrap());
        assert!(!matches(&lower, &r, jan_1()).unwrap());
    }

    #[test]
    fn test_lead_time_threshold() {
        let r = rules(&[(LEAD_TIME, "1d,2h")]);
        let after = event("Late", "02-01-24 03:00:00", "", "");
        let before = event("Early", "02-01-24 01:00:00", "", "");
        let exactly = event("Edge", "02-01-24 02:00:00", "", "");

        assert!(matches(&after, &r, jan_1()).unwrap());
        assert!(!matches(&before, &r, jan_1()).unwrap());
        assert!(!matches(&exactly, &r, jan_1()).unwrap());
    }

    #[test]
    fn test_lead_time_is_monotonic() {
        let e = event("Planning", "02-01-24 03:00:00", "", "");
        let mut previously_rejected = false;
        for hours in 0..=48 {
            let r = rules(&[(LEAD_TIME, format!("{hours}h").as_str())]);
            let accepted = matches(&e, &r, jan_1()).unwrap();
            assert!(!(previously_rejected && accepted), "accepted again at {hours}h");
            previously_rejected |= !accepted;
        }
        assert!(previously_rejected);
    }

    #[test]
    fn test_rules_compose_with_and() {
        let location = rules(&[(LOCATION, "room a")]);
        let contains = rules(&[(CONTAINS, "Standup")]);
        let both = rules(&[(LOCATION, "room a"), (CONTAINS, "Standup")]);

        let candidates = [
            event("Daily Standup", "02-01-24 09:00:00", "Room A", ""),
            event("Daily Standup", "02-01-24 09:00:00", "Room B", ""),
            event("Retro", "02-01-24 09:00:00", "Room A", ""),
            event("Retro", "02-01-24 09:00:00", "Room B", ""),
        ];

        for e in &candidates {
            let expected =
                matches(e, &location, jan_1()).unwrap() && matches(e, &contains, jan_1()).unwrap();
            assert_eq!(matches(e, &both, jan_1()).unwrap(), expected, "{e}");
        }
    }

    #[test]
    fn test_unknown_rules_are_ignored() {
        let r = rules(&[("priority", "high")]);
        let e = event("Anything", "02-01-24 09:00:00", "", "");
        assert!(matches(&e, &r, jan_1()).unwrap());
    }

    #[test]
    fn test_malformed_lead_time_is_an_error() {
        let r = rules(&[(LEAD_TIME, "tomorrow")]);
        let e = event("Anything", "02-01-24 09:00:00", "", "");
        let err = matches(&e, &r, jan_1()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRule);
    }
}
