//! Source adapters: turn calendar files into canonical events.

pub mod ics;
pub mod json;

use std::path::Path;
use std::str::FromStr;

use crate::error::{CalertError, CalertResult};
use crate::event::CanonicalEvent;

/// The input formats calert understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Ics,
    Json,
}

impl SourceKind {
    /// Parse raw bytes with the adapter for this kind. Events keep source order.
    pub fn parse_events(self, bytes: &[u8]) -> CalertResult<Vec<CanonicalEvent>> {
        match self {
            SourceKind::Ics => ics::parse_events(bytes),
            SourceKind::Json => json::parse_events(bytes),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SourceKind::Ics => "ICS",
            SourceKind::Json => "JSON",
        }
    }
}

impl FromStr for SourceKind {
    type Err = CalertError;

    /// Accepts the menu numbers (`1`, `2`) as well as the format names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "ics" => Ok(SourceKind::Ics),
            "2" | "json" => Ok(SourceKind::Json),
            _ => Err(CalertError::InvalidSelection(
                "Choose 1 or 2 for ICS or JSON".into(),
            )),
        }
    }
}

/// Read a calendar file from disk and parse it.
pub fn read_events(kind: SourceKind, path: &Path) -> CalertResult<Vec<CanonicalEvent>> {
    let bytes = std::fs::read(path).map_err(|source| CalertError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    kind.parse_events(&bytes)
}
