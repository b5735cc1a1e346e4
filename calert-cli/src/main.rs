mod commands;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use calert_core::CalertError;
use calert_core::settings::Settings;
use clap::{Parser, Subcommand};
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "calert")]
#[command(about = "Turn ICS or JSON calendar files into event alerts filtered by your rules")]
struct Cli {
    /// Log file (defaults to log_file from config.toml, then log.txt)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log level or filter directive (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "debug")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate alerts for upcoming events (prompts for anything not given)
    Alerts(commands::alerts::AlertsArgs),
    /// Print the events of a calendar file after normalization
    Events {
        /// Input format: 1/ics or 2/json
        kind: String,

        /// Path to the calendar file
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load()?;

    let log_file = cli.log_file.unwrap_or_else(|| settings.log_file.clone());
    logging::init(&log_file, &cli.log_level)?;
    debug!(log_file = %log_file.display(), "Configured logging");

    let result = match cli.command {
        Some(Commands::Alerts(args)) => commands::alerts::run(args, &settings),
        Some(Commands::Events { kind, path }) => commands::events::run(&kind, &path),
        None => commands::alerts::run(commands::alerts::AlertsArgs::default(), &settings),
    };

    if let Err(e) = &result {
        match e.downcast_ref::<CalertError>() {
            Some(calert_error) => error!(kind = %calert_error.kind(), "{:#}", e),
            None => error!("{:#}", e),
        }
    }

    result
}
