use std::path::Path;

use anyhow::Result;
use calert_core::source::{self, SourceKind};
use owo_colors::OwoColorize;
use tracing::info;

pub fn run(kind: &str, path: &Path) -> Result<()> {
    let kind: SourceKind = kind.parse()?;
    let events = source::read_events(kind, path)?;
    info!(kind = kind.name(), count = events.len(), path = %path.display(), "Listed events");

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for event in &events {
        println!(
            "  {} {} {}",
            event.dtstart.to_string().bold(),
            event.summary,
            format!("(until {})", event.dtend).dimmed()
        );
        if !event.location.is_empty() {
            println!("    {}", event.location.dimmed());
        }
    }

    Ok(())
}
