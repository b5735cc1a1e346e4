//! Alert selection, rendering and output sinks.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::{CalertError, CalertResult};
use crate::event::{CanonicalEvent, Field};
use crate::rules::{RuleSet, matches};

/// Header line opening every alert block
pub const ALERT_HEADER: &str = "EVENT ALERT";

/// Name of the file written by [`FileSink`]
pub const ALERTS_FILE_NAME: &str = "Alerts.txt";

/// Events (in source order) that pass the rules and have not started yet.
pub fn select_alerts<'a>(
    events: &'a [CanonicalEvent],
    rules: &RuleSet,
    now: NaiveDateTime,
) -> CalertResult<Vec<&'a CanonicalEvent>> {
    let mut selected = Vec::new();
    for event in events {
        if matches(event, rules, now)? && event.dtstart.naive() > now {
            selected.push(event);
        }
    }
    Ok(selected)
}

/// Render one alert block: the header, then one labelled line per non-empty field.
pub fn render_alert(event: &CanonicalEvent) -> String {
    let mut lines = vec![ALERT_HEADER.to_string()];
    for field in Field::RENDER_ORDER {
        if let Some(value) = event.field(field) {
            lines.push(format!("{}: {}", field.label(), value));
        }
    }
    lines.join("\n") + "\n"
}

/// Render every alert, separating blocks with a blank line.
pub fn render_alerts<'a>(events: impl IntoIterator<Item = &'a CanonicalEvent>) -> String {
    events
        .into_iter()
        .map(render_alert)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Where alerts should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Screen,
    File,
}

impl FromStr for OutputKind {
    type Err = CalertError;

    /// Accepts the menu numbers (`1`, `2`) as well as the output names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "screen" => Ok(OutputKind::Screen),
            "2" | "file" => Ok(OutputKind::File),
            _ => Err(CalertError::InvalidSelection(
                "Choose 1 or 2 for Screen or File".into(),
            )),
        }
    }
}

/// Destination for rendered alert text.
pub trait AlertSink {
    fn write_alerts(&mut self, rendered: &str) -> CalertResult<()>;
}

/// Writes alerts to a stream, stdout by default.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        ConsoleSink { out: io::stdout() }
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        ConsoleSink { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AlertSink for ConsoleSink<W> {
    fn write_alerts(&mut self, rendered: &str) -> CalertResult<()> {
        // Console failures have no path; report them as the sink "<stdout>".
        let to_error = |source| CalertError::SinkUnwritable {
            path: PathBuf::from("<stdout>"),
            source,
        };
        self.out.write_all(rendered.as_bytes()).map_err(to_error)?;
        self.out.flush().map_err(to_error)
    }
}

/// Writes alerts to `Alerts.txt` inside a directory, replacing any previous file.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn in_dir(dir: &Path) -> Self {
        FileSink {
            path: dir.join(ALERTS_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AlertSink for FileSink {
    fn write_alerts(&mut self, rendered: &str) -> CalertResult<()> {
        let to_error = |source| CalertError::SinkUnwritable {
            path: self.path.clone(),
            source,
        };
        let mut file = File::create(&self.path).map_err(to_error)?;
        file.write_all(rendered.as_bytes()).map_err(to_error)?;
        file.flush().map_err(to_error)
    }
}

/// Outcome of a [`generate_alerts`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertReport {
    pub rendered: String,
    pub alert_count: usize,
    pub event_count: usize,
}

/// Select, render and write alerts for `events` in one pass.
pub fn generate_alerts(
    events: &[CanonicalEvent],
    rules: &RuleSet,
    now: NaiveDateTime,
    sink: &mut dyn AlertSink,
) -> CalertResult<AlertReport> {
    let selected = select_alerts(events, rules, now)?;
    let rendered = render_alerts(selected.iter().copied());
    sink.write_alerts(&rendered)?;

    Ok(AlertReport {
        rendered,
        alert_count: selected.len(),
        event_count: events.len(),
    })
}
