//! Core engine for calert.
//!
//! - `event`: the canonical event every source is normalized into
//! - `source`: ICS and JSON adapters
//! - `rules`: rule file loading and evaluation
//! - `alert`: alert selection, rendering and sinks

pub mod alert;
pub mod error;
pub mod event;
pub mod rules;
pub mod settings;
pub mod source;

pub use error::{CalertError, CalertResult, ErrorKind};
pub use event::{CanonicalEvent, Field, Timestamp};
