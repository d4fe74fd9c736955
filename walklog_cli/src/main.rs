use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use walklog_core::*;

#[derive(Parser)]
#[command(name = "walklog")]
#[command(about = "Daily step, distance and calorie tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the current local time (for testing), e.g. 2024-03-14T09:00:00
    #[arg(long, global = true, hide = true)]
    now: Option<NaiveDateTime>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record steps walked since the previous submission and print today's summary
    Submit {
        /// Time of the reading, HH:MM:SS
        time: String,

        /// Steps walked since the previous reading
        steps: u64,
    },

    /// Print the summary of a day without recording anything
    Show {
        /// Day to show (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    walklog_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.data_dir.clone());
    let store = JsonDayStore::new(data_dir.join("days"));
    tracing::debug!("Using data directory {:?}", data_dir);

    match cli.now {
        Some(now) => {
            tracing::info!("Clock overridden to {}", now);
            run(Tracker::new(store, FixedClock(now), &config), cli.command)
        }
        None => run(Tracker::with_system_clock(store, &config), cli.command),
    }
}

fn run<C: Clock>(tracker: Tracker<JsonDayStore, C>, command: Commands) -> Result<()> {
    match command {
        Commands::Submit { time, steps } => cmd_submit(tracker, Submission::new(time, steps)),
        Commands::Show { date } => cmd_show(&tracker, date),
    }
}

fn cmd_submit<C: Clock>(
    mut tracker: Tracker<JsonDayStore, C>,
    submission: Submission,
) -> Result<()> {
    let report = tracker.submit_today(&submission)?;

    match &report.outcome {
        Some(SubmissionOutcome::Rejected(reason)) => {
            tracing::debug!("Submission for {} left the record unchanged", report.date);
            eprintln!("Submission ignored: {}", reason);
        }
        Some(SubmissionOutcome::Accepted { calories }) => {
            tracing::debug!("Recorded {:.2} kcal for {}", calories, report.date);
        }
        None => {}
    }

    println!("{}", report);
    Ok(())
}

fn cmd_show<C: Clock>(
    tracker: &Tracker<JsonDayStore, C>,
    date: Option<NaiveDate>,
) -> Result<()> {
    let date = date.unwrap_or_else(|| tracker.today());

    match tracker.summary(date)? {
        Some(report) => println!("{}", report),
        None => println!("No walks recorded for {}.", date),
    }
    Ok(())
}
