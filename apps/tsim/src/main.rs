//! tsim: transit trip telemetry simulator.
//!
//! Drives simulated vehicles along a route and reports their positions to
//! the trip service, either one trip in real time or whole days, months and
//! half-year periods in batch mode.  With `--route-file` and `--output` it
//! runs without the service and writes CSV files instead.
//!
//! ```text
//! tsim realtime -r R -a 10
//! tsim --output out/ --route-file route.json --seed 7 date -r R -d 20240315
//! tsim month -r R -m 202403
//! tsim clean period 2024S1
//! tsim analyze month 202403
//! ```

mod logging;
mod run;


use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use tsim_api::{AnalyticsScope, ApiClient, ApiConfig, TripFilter};
use tsim_core::{RouteId, TripId};
use tsim_schedule::{DayId, MonthId, Period};

use logging::{LogFormat, init_logging};
use run::{RunOptions, Runner};

// ── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "tsim", version, about = "Transit trip telemetry simulator")]
struct Cli {
    /// Base URL of the trip service, e.g. http://localhost:3000/api
    #[arg(long, env = "API_BASE_URL", global = true)]
    api_base_url: Option<String>,

    /// Per-request timeout for the trip service, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 10, global = true)]
    api_timeout_secs: u64,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    /// Read the route from a local JSON file instead of the trip service
    #[arg(long, value_name = "PATH", global = true)]
    route_file: Option<PathBuf>,

    /// Write locations.csv and trip_summaries.csv here instead of posting
    /// to the trip service
    #[arg(long, value_name = "DIR", global = true)]
    output: Option<PathBuf>,

    /// Seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Give up on a location report after this many seconds
    #[arg(long, value_name = "SECS", global = true)]
    report_timeout_secs: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drive one trip departing now, paced by the wall clock
    Realtime {
        #[arg(short, long, default_value = "R")]
        route: RouteId,
        /// Run this many times faster than real time
        #[arg(short, long, default_value_t = 1.0)]
        acceleration: f64,
    },
    /// Every departure of one day, in batch mode
    Date {
        #[arg(short, long)]
        route: RouteId,
        /// yyyymmdd
        #[arg(short, long)]
        day: DayId,
    },
    /// Sampled days of one month, in batch mode
    Month {
        #[arg(short, long)]
        route: RouteId,
        /// yyyymm
        #[arg(short, long)]
        month: MonthId,
    },
    /// Sampled days of one half-year, in batch mode
    Period {
        #[arg(short, long)]
        route: RouteId,
        /// yyyyS1 or yyyyS2
        #[arg(short, long)]
        period: Period,
    },
    /// Delete generated trips
    Clean {
        #[command(subcommand)]
        target: CleanTarget,
    },
    /// Run analytics and print the result as JSON
    Analyze {
        #[command(subcommand)]
        scope: AnalyzeScope,
    },
}

#[derive(Subcommand, Debug)]
enum CleanTarget {
    Trip { id: TripId },
    Month { id: MonthId },
    Period { id: Period },
}

impl From<CleanTarget> for TripFilter {
    fn from(target: CleanTarget) -> Self {
        match target {
            CleanTarget::Trip { id } => TripFilter::Trip(id),
            CleanTarget::Month { id } => TripFilter::Month(id),
            CleanTarget::Period { id } => TripFilter::Period(id),
        }
    }
}

#[derive(Subcommand, Debug)]
enum AnalyzeScope {
    Month { id: MonthId },
    Period { id: Period },
}

impl From<AnalyzeScope> for AnalyticsScope {
    fn from(scope: AnalyzeScope) -> Self {
        match scope {
            AnalyzeScope::Month { id } => AnalyticsScope::Month(id),
            AnalyzeScope::Period { id } => AnalyticsScope::Period(id),
        }
    }
}

impl Cli {
    fn run_options(&self) -> Result<RunOptions> {
        let api = match &self.api_base_url {
            Some(url) => {
                let timeout = Duration::from_secs(self.api_timeout_secs);
                let config = ApiConfig::new(url)?.with_request_timeout(timeout);
                Some(ApiClient::new(config)?)
            }
            None => None,
        };
        Ok(RunOptions {
            api,
            route_file:          self.route_file.clone(),
            output:              self.output.clone(),
            seed:                self.seed,
            report_timeout_secs: self.report_timeout_secs,
        })
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format)?;

    let runner = Runner::new(cli.run_options()?)?;

    let cancel = runner.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, stopping trips");
            cancel.cancel();
        }
    });

    match cli.command {
        Command::Realtime { route, acceleration } => {
            let summary = runner.realtime(&route, acceleration).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Date { route, day } => {
            let trips = runner.date(&route, day).await?;
            info!(%route, %day, trips, "done");
        }
        Command::Month { route, month } => {
            let trips = runner.month(&route, month).await?;
            info!(%route, %month, trips, "done");
        }
        Command::Period { route, period } => {
            let trips = runner.period(&route, period).await?;
            info!(%route, %period, trips, "done");
        }
        Command::Clean { target } => {
            runner.clean(&target.into()).await?;
        }
        Command::Analyze { scope } => {
            let result = runner.analyze(scope.into()).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}
