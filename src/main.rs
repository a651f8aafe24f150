use std::io;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use lootframe::{filter, resolve_at, FormatError, TimeFrame};

#[derive(Parser)]
#[clap(about)]
/// A CLI for scoping downloaded media metadata to a time frame
struct Cli {
    /// Only report warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a time-frame token into explicit bounds
    Resolve {
        /// Either [START:STOP] with optional ISO dates, or one of the
        /// keywords [thisday], [thisweek], [thismonth], [thisyear]
        token: String,
        /// Reference date standing in for today [YYYY-MM-DD]
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,
        /// Print the bounds as JSON
        #[arg(long)]
        json: bool,
    },
    /// Keep the metadata records on stdin whose timestamp falls in the frame
    ///
    /// Expects one JSON object per line, as produced by a metadata dump
    Filter {
        /// Either [START:STOP] with optional ISO dates, or a keyword
        token: String,
        /// Metadata key holding the item timestamp
        #[arg(short, long, default_value = "date")]
        key: String,
        /// Reference date standing in for today [YYYY-MM-DD]
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,
    },
}

fn main() {
    let cli = Cli::parse();
    let default = if cli.quiet { "warn" } else { "info" };
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default));
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Resolve { token, today, json } => {
            let frame = resolve_token(&token, today)?;
            if json {
                println!("{}", serde_json::to_string(&frame)?);
            } else {
                println!("start: {}", bound_to_string(frame.start));
                println!("stop:  {}", bound_to_string(frame.stop));
            }
        }
        Command::Filter { token, key, today } => {
            let frame = resolve_token(&token, today)?;
            log::info!("keeping items whose {key:?} falls within \"{frame}\"");
            let stdin = io::stdin();
            let mut stdout = io::stdout().lock();
            let stats = filter::filter_lines(stdin.lock(), &mut stdout, &frame, &key)?;
            log::info!(
                "kept {} items ({} outside the frame, {} without a timestamp)",
                stats.kept,
                stats.dropped,
                stats.skipped
            );
        }
    }
    Ok(())
}

fn resolve_token(token: &str, today: Option<NaiveDate>) -> Result<TimeFrame, FormatError> {
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    resolve_at(token, today)
}

fn bound_to_string(bound: Option<NaiveDate>) -> String {
    match bound {
        Some(date) => date.to_string(),
        None => "unbounded".to_string(),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| "date must be in the form [YYYY-MM-DD]".to_string())
}
