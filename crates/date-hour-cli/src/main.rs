//! Command-line front end for the date-hour library.
//!
//! Parses a period text, prints its boundaries, shifts it by whole hours, or
//! counts the hours a range spans. Exists as a demonstration surface; the
//! library is the product.

use anyhow::Result;
use clap::{Parser, Subcommand};

use date_hour::{DateHour, TimeRange};

#[derive(Parser)]
#[command(name = "date-hour", version, about = "Inspect hour-granular calendar periods")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the start and stop boundaries of a period
    Bounds {
        /// Period text, e.g. "2024", "2024-02", "2024-02-15 14"
        period: String,
        /// Emit a JSON object instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Shift a period by whole hours and print the resulting hour
    Shift {
        /// Period text; shifting starts from the period's first hour
        period: String,
        /// Hour offset, may be negative
        #[arg(allow_hyphen_values = true)]
        hours: i64,
    },
    /// Count the inclusive hours a range spans
    Length {
        /// Start period, or a self-sufficient period when STOP is omitted
        start: String,
        /// Optional stop period
        stop: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Bounds { period, json } => {
            let range = TimeRange::parse(&period)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&range)?);
            } else {
                println!("start: {}", range.start);
                println!("stop:  {}", range.stop);
            }
        }
        Command::Shift { period, hours } => {
            let shifted = DateHour::parse(&period)?.shift(hours);
            println!("{shifted}");
        }
        Command::Length { start, stop } => {
            let range = match stop {
                Some(stop) => TimeRange::parse_bounds(&start, &stop)?,
                None => TimeRange::parse(&start)?,
            };
            println!("{}", range.len_hours()?);
        }
    }

    Ok(())
}
