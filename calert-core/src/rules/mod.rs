//! User-defined alert rules.
//!
//! Rules are stored in a flat text file, one `name:value` per line:
//!
//! ```text
//! location:room a
//! contains:Standup
//! alert(d,h,min,sec):1d,2h
//! ```
//!
//! Values are not validated when the file is loaded; a malformed value only
//! surfaces when [`matches`] interprets it.

mod evaluate;
mod lead_time;

pub use evaluate::matches;
pub use lead_time::parse_lead_time;

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{CalertError, CalertResult};

/// Rule name for the case-insensitive location match
pub const LOCATION: &str = "location";
/// Rule name for the case-insensitive status match
pub const STATUS: &str = "status";
/// Rule name for the case-sensitive summary substring match
pub const CONTAINS: &str = "contains";
/// Rule name for the minimum lead time before an event starts
pub const LEAD_TIME: &str = "alert(d,h,min,sec)";

/// Rule name -> rule value. Later definitions of a name replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: BTreeMap<String, String>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `name:value` lines. Lines without a `:` or with an empty name are skipped.
    pub fn parse(content: &str) -> Self {
        let mut rules = RuleSet::new();
        for line in content.lines() {
            let Some((name, value)) = line.split_once(':') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            rules.insert(name, value.trim());
        }
        rules
    }

    /// Load rules from a file on disk.
    pub fn load(path: &Path) -> CalertResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| CalertError::SourceUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::parse(&content))
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.rules.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.rules.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut rules = RuleSet::new();
        for (name, value) in iter {
            rules.insert(name, value);
        }
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_rules() {
        let rules = RuleSet::parse("location:room a\ncontains:Standup\nalert(d,h,min,sec):1d,2h\n");

        assert_eq!(rules.len(), 3);
        assert_eq!(rules.get(LOCATION), Some("room a"));
        assert_eq!(rules.get(CONTAINS), Some("Standup"));
        assert_eq!(rules.get(LEAD_TIME), Some("1d,2h"));
    }

    #[test]
    fn test_parse_splits_on_first_colon() {
        let rules = RuleSet::parse("contains:Sync: weekly\r\n");
        assert_eq!(rules.get(CONTAINS), Some("Sync: weekly"));
    }

    #[test]
    fn test_parse_skips_empty_names_and_blank_lines() {
        let rules = RuleSet::parse(":orphan\n\n   \nno colon here\nstatus:confirmed\n");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.get(STATUS), Some("confirmed"));
    }

    #[test]
    fn test_values_are_trimmed() {
        let rules = RuleSet::parse("contains: Standup 
location :  Room A
");
        assert_eq!(rules.get(CONTAINS), Some("Standup"));
        assert_eq!(rules.get(LOCATION), Some("Room A"));
    }

    #[test]
    fn test_last_definition_wins() {
        let rules = RuleSet::parse("location:room a\nlocation:room b\n");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.get(LOCATION), Some("room b"));
    }

    #[test]
    fn test_values_are_not_validated_on_load() {
        let rules = RuleSet::parse("alert(d,h,min,sec):soon\nfavourite:yes\n");
        assert_eq!(rules.get(LEAD_TIME), Some("soon"));
        assert_eq!(rules.get("favourite"), Some("yes"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.txt");
        std::fs::write(&path, "status:confirmed\n").unwrap();

        let rules = RuleSet::load(&path).unwrap();
        assert_eq!(rules.get(STATUS), Some("confirmed"));

        let err = RuleSet::load(&dir.path().join("missing.txt")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SourceUnreadable);
    }
}
