use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calert_core::alert::{self, ConsoleSink, FileSink, OutputKind};
use calert_core::rules::RuleSet;
use calert_core::settings::Settings;
use calert_core::source::{self, SourceKind};
use chrono::Local;
use clap::Args;
use dialoguer::Input;
use owo_colors::OwoColorize;
use tracing::info;

#[derive(Args, Default)]
pub struct AlertsArgs {
    /// Input format: 1/ics or 2/json
    #[arg(long)]
    pub input_kind: Option<String>,

    /// Path to the calendar file
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output: 1/screen or 2/file
    #[arg(long)]
    pub output_kind: Option<String>,

    /// Directory that receives Alerts.txt
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Rule file (defaults to rules_file from config.toml)
    #[arg(short, long)]
    pub rules: Option<PathBuf>,
}

pub fn run(args: AlertsArgs, settings: &Settings) -> Result<()> {
    info!("Started the menu");

    // --- Input ---
    let kind: SourceKind = match args.input_kind {
        Some(k) => k,
        None => prompt("Choose the type of file you want to use: (ICS/JSON) [1/2]")?,
    }
    .parse()?;
    info!(kind = kind.name(), "Chose the type of input");

    let input = match args.input {
        Some(path) => path,
        None => PathBuf::from(prompt(&format!("Enter the path to the {} file", kind.name()))?),
    };
    let events = source::read_events(kind, &input)?;
    info!(count = events.len(), path = %input.display(), "Read the events from the given file");

    let rules = load_rules(args.rules.as_deref(), settings)?;

    // --- Output ---
    let output: OutputKind = match args.output_kind {
        Some(k) => k,
        None => prompt("Choose the format of the alerts: (Screen/File) [1/2]")?,
    }
    .parse()?;
    info!(output = ?output, "Chose the type of output");

    // Read once; rule checks and the future-only filter share it.
    let now = Local::now().naive_local();

    match output {
        OutputKind::Screen => {
            let mut sink = ConsoleSink::stdout();
            let report = alert::generate_alerts(&events, &rules, now, &mut sink)?;
            if report.alert_count == 0 {
                println!("{}", "No upcoming events match your rules".dimmed());
            }
            info!(alerts = report.alert_count, events = report.event_count, "Generated alerts");
        }
        OutputKind::File => {
            let dir = match args.output_dir {
                Some(dir) => dir,
                None => prompt_output_dir(settings.output_dir.as_deref())?,
            };
            let mut sink = FileSink::in_dir(&dir);
            let report = alert::generate_alerts(&events, &rules, now, &mut sink)?;
            println!("{}", format!("Created {}", sink.path().display()).green());
            info!(
                alerts = report.alert_count,
                events = report.event_count,
                path = %sink.path().display(),
                "Generated alerts"
            );
        }
    }

    Ok(())
}

/// An explicit rule file must exist; the default one is optional.
fn load_rules(explicit: Option<&Path>, settings: &Settings) -> Result<RuleSet> {
    if let Some(path) = explicit {
        let rules = RuleSet::load(path)?;
        info!(count = rules.len(), path = %path.display(), "Loaded rules");
        return Ok(rules);
    }

    let path = &settings.rules_file;
    if !path.exists() {
        info!(path = %path.display(), "No rule file, every upcoming event will alert");
        return Ok(RuleSet::new());
    }

    let rules = RuleSet::load(path)?;
    info!(count = rules.len(), path = %path.display(), "Loaded rules");
    Ok(rules)
}

fn prompt(text: &str) -> Result<String> {
    let answer = Input::<String>::new()
        .with_prompt(text)
        .interact_text()
        .context("Failed to read answer")?;
    Ok(answer.trim().to_string())
}

fn prompt_output_dir(default: Option<&Path>) -> Result<PathBuf> {
    let mut input = Input::<String>::new().with_prompt("Enter the directory path to the new file");
    if let Some(dir) = default {
        input = input.default(dir.display().to_string());
    }
    let answer = input.interact_text().context("Failed to read answer")?;
    Ok(PathBuf::from(answer.trim()))
}
