//! `lavalo` CLI -- compute bay and hour availability from booking snapshots.
//!
//! ## Usage
//!
//! ```sh
//! # Availability for today + 7 days, slots and reservations from files
//! lavalo availability --slots slots.json --reservations reservations.json
//!
//! # Slots from stdin, pretty output written to a file
//! cat slots.json | lavalo availability --slots - --pretty -o availability.json
//!
//! # Fixed reference instant, local calendar of Santiago
//! lavalo availability --slots slots.json --now 2026-03-16T12:00:00Z \
//!     --timezone America/Santiago
//!
//! # Business hours from a config file, with a step override
//! lavalo availability --slots slots.json --config engine.json --step 15
//!
//! # Print the bookable times of one day
//! lavalo grid --start-hour 9 --end-hour 18
//! ```
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=lavalo_engine=debug`) or pass `--verbose`
//! for diagnostics on stderr.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use lavalo_engine::availability::to_json;
use lavalo_engine::{
    generate_time_grid, ApiError, AvailabilityService, EngineConfig, EngineError,
    InMemorySource, Reservation, Slot,
};
use std::io::{self, Read};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lavalo",
    version,
    about = "Bay and hour availability for the booking backend"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute availability for today and the following days
    Availability {
        /// Slots JSON file ("-" reads stdin)
        #[arg(long)]
        slots: String,
        /// Reservations JSON file ("-" reads stdin); none if omitted
        #[arg(long)]
        reservations: Option<String>,
        #[command(flatten)]
        config: ConfigArgs,
        /// Number of days after today to include
        #[arg(long)]
        days: Option<u32>,
        /// IANA timezone defining the local calendar (e.g., "America/Santiago")
        #[arg(long)]
        timezone: Option<String>,
        /// Reference instant (RFC 3339); defaults to the current time
        #[arg(long)]
        now: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the bookable times of one business day
    Grid {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

/// Engine configuration sources shared by all subcommands.
#[derive(Args)]
struct ConfigArgs {
    /// Engine configuration JSON file
    #[arg(long)]
    config: Option<String>,
    /// First bookable hour (inclusive)
    #[arg(long)]
    start_hour: Option<u32>,
    /// Closing hour (exclusive)
    #[arg(long)]
    end_hour: Option<u32>,
    /// Minutes between bookable times
    #[arg(long)]
    step: Option<u32>,
}

impl ConfigArgs {
    /// Load the config file (if any), then apply flag overrides.
    fn resolve(&self) -> Result<EngineConfig> {
        let mut config = match self.config.as_deref() {
            Some(path) => {
                let raw = read_input(Some(path))?;
                serde_json::from_str::<EngineConfig>(&raw)
                    .with_context(|| format!("Invalid config file: {}", path))?
            }
            None => EngineConfig::default(),
        };
        let hours = &mut config.business_hours;
        if let Some(h) = self.start_hour {
            hours.start_hour = h;
        }
        if let Some(h) = self.end_hour {
            hours.end_hour = h;
        }
        if let Some(step) = self.step {
            hours.step_minutes = step;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Availability {
            slots,
            reservations,
            config,
            days,
            timezone,
            now,
            output,
            pretty,
        } => {
            ensure_single_stdin(&[
                Some(slots.as_str()),
                reservations.as_deref(),
                config.config.as_deref(),
            ])?;
            let mut config = config.resolve()?;
            if let Some(days) = days {
                config.days_ahead = days;
            }
            if let Some(tz) = timezone.as_deref() {
                config.timezone = parse_timezone(tz)?;
            }
            let now = now.as_deref().map(parse_datetime).transpose()?;

            let slots: Vec<Slot> = read_json(Some(&slots), "slots")?;
            let reservations: Vec<Reservation> = match reservations.as_deref() {
                Some(path) => read_json(Some(path), "reservations")?,
                None => Vec::new(),
            };
            debug!(
                slots = slots.len(),
                reservations = reservations.len(),
                ?now,
                "loaded snapshots"
            );

            let source = InMemorySource::new(slots, reservations);
            let service = AvailabilityService::new(source, config);
            let projection = match now {
                Some(now) => service.week_availability(now),
                None => service.week_availability_now(),
            };
            let json = projection.and_then(|projection| to_json(&projection, pretty));
            match json {
                Ok(json) => write_output(output.as_deref(), &json)?,
                Err(err) => exit_with(&err),
            }
        }
        Commands::Grid { config } => {
            let config = config.resolve()?;
            if let Err(err) = config.validate() {
                exit_with(&err);
            }
            for label in generate_time_grid(&config.business_hours) {
                println!("{}", label);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Print the API error body to stderr and exit; 2 for not-found, 1 otherwise.
fn exit_with(err: &EngineError) -> ! {
    let body = ApiError::from(err);
    match serde_json::to_string(&body) {
        Ok(json) => eprintln!("{}", json),
        Err(_) => eprintln!("Error: {}", err),
    }
    process::exit(if body.code == 404 { 2 } else { 1 });
}

fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|e| anyhow::anyhow!("Invalid timezone '{}': {}", s, e))
}

/// Accepts RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS` interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .with_context(|| format!("Invalid datetime: {}", s))
}

/// Stdin can feed only one input per run.
fn ensure_single_stdin(inputs: &[Option<&str>]) -> Result<()> {
    let from_stdin = inputs.iter().filter(|p| **p == Some("-")).count();
    if from_stdin > 1 {
        anyhow::bail!("Only one of --slots, --reservations and --config can read stdin (\"-\")");
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: Option<&str>, what: &str) -> Result<T> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid {} JSON", what))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) if path != "-" => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
