//! Orchestration of trips for each command.
//!
//! A [`Runner`] decides where routes come from (`--route-file` or the trip
//! service) and where reports go (the trip service, or CSV files under
//! `--output`).  Trips of one day run one after another; days of a month or
//! period run concurrently on the same task.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use futures_util::future::join_all;
use tracing::{error, info, warn};

use tsim_api::{AnalyticsScope, ApiClient, HttpReporter, TripFilter};
use tsim_core::{RouteId, SimRng, TripId};
use tsim_output::{
    CsvReporter, CsvWriter, OutputWriter, SharedWriter, TripSummaryRow, shared, with_writer,
};
use tsim_route::{Route, load_route_json};
use tsim_schedule::{
    DayId, MonthId, Period, SAMPLE_STEP_DAYS, TripPlan, day_plans, sample_dates,
};
use tsim_trip::{
    CancelToken, LocationReporter, TripConfig, TripSimulator, TripSummary, sample_variation_factor,
};

/// Settings shared by every command, gathered from the global CLI flags.
#[derive(Debug, Default)]
pub struct RunOptions {
    pub api: Option<ApiClient>,
    pub route_file: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub seed: Option<u64>,
    pub report_timeout_secs: Option<f64>,
}

pub struct Runner {
    api: Option<ApiClient>,
    route_file: Option<PathBuf>,
    output: Option<SharedWriter<CsvWriter>>,
    seed: Option<u64>,
    report_timeout_secs: Option<f64>,
    cancel: CancelToken,
}

impl Runner {
    /// Opens the CSV files right away when `--output` is set.
    pub fn new(options: RunOptions) -> Result<Self> {
        let output = match &options.output {
            Some(dir) => Some(shared(CsvWriter::new(dir).with_context(|| {
                format!("opening output directory {}", dir.display())
            })?)),
            None => None,
        };
        Ok(Self {
            api: options.api,
            route_file: options.route_file,
            output,
            seed: options.seed,
            report_timeout_secs: options.report_timeout_secs,
            cancel: CancelToken::new(),
        })
    }

    /// Cancelling this token stops every running trip at its next step.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Register and drive one trip departing now, pacing reports by the
    /// wall clock sped up `acceleration` times.
    pub async fn realtime(&self, route_id: &RouteId, acceleration: f64) -> Result<TripSummary> {
        if self.output.is_none() {
            self.api()?.cleanup().await.context("cleaning up interrupted trips")?;
        }
        let route = self.route(route_id).await?;
        let plan = TripPlan::starting_at(route_id, &route.drivers, &Local::now());

        let mut config = TripConfig::realtime(acceleration);
        config.trip_start_ms = Some(plan.start_ms);
        config.seed = self.seed;
        self.apply_overrides(&mut config);

        info!(
            route = %route_id,
            day = %plan.day,
            start = %plan.start,
            acceleration,
            "real-time trip"
        );
        let summary = self.run_trip(&route, &plan, config, true).await?;
        self.finish()?;
        Ok(summary)
    }

    /// Every departure of `day`, in batch mode.  Returns the number of
    /// trips run.
    pub async fn date(&self, route_id: &RouteId, day: DayId) -> Result<usize> {
        let route = self.route(route_id).await?;
        let seed = self.run_rng().child_seed();
        let trips = self.run_day(route_id, &route, day.date(), seed).await?;
        self.finish()?;
        Ok(trips)
    }

    /// The sampled days of `month` that lie before today.
    pub async fn month(&self, route_id: &RouteId, month: MonthId) -> Result<usize> {
        let dates = sample_dates(month.first_day(), month.last_day(), today(), SAMPLE_STEP_DAYS);
        self.run_dates(route_id, dates).await
    }

    /// The sampled days of `period` that lie before today.
    pub async fn period(&self, route_id: &RouteId, period: Period) -> Result<usize> {
        let dates = sample_dates(period.first_day(), period.last_day(), today(), SAMPLE_STEP_DAYS);
        self.run_dates(route_id, dates).await
    }

    pub async fn clean(&self, filter: &TripFilter) -> Result<()> {
        let api = self.api()?;
        api.delete_trips(filter).await.context("deleting trips")?;
        info!(?filter, service = %api.base_url(), "trips deleted");
        Ok(())
    }

    pub async fn analyze(&self, scope: AnalyticsScope) -> Result<serde_json::Value> {
        self.api()?.analytics(scope).await.context("running analytics")
    }

    // ── Days ──────────────────────────────────────────────────────────────

    /// Run `dates` concurrently.  A failed day is logged and does not stop
    /// the others; the run fails if any day did.
    pub async fn run_dates(&self, route_id: &RouteId, dates: Vec<NaiveDate>) -> Result<usize> {
        if dates.is_empty() {
            warn!(route = %route_id, "no sampled dates before today");
            return Ok(0);
        }
        let route = self.route(route_id).await?;

        let mut rng = self.run_rng();
        let days: Vec<(NaiveDate, u64)> =
            dates.into_iter().map(|d| (d, rng.child_seed())).collect();

        let results = join_all(
            days.iter().map(|&(date, seed)| self.run_day(route_id, &route, date, seed)),
        )
        .await;

        let mut trips = 0;
        let mut failed = 0;
        for (&(date, _), result) in days.iter().zip(results) {
            match result {
                Ok(n) => trips += n,
                Err(e) => {
                    failed += 1;
                    error!(day = %DayId::new(date), error = %format!("{e:#}"), "day failed");
                }
            }
        }
        self.finish()?;

        if failed > 0 {
            bail!("{failed} of {} days failed", days.len());
        }
        info!(route = %route_id, days = days.len(), trips, "run finished");
        Ok(trips)
    }

    /// The departures of `date`, one after another.  Each trip draws its
    /// variation factor and RNG seed from a day RNG seeded with `seed`.
    async fn run_day(
        &self,
        route_id: &RouteId,
        route: &Route,
        date: NaiveDate,
        seed: u64,
    ) -> Result<usize> {
        let mut rng = SimRng::new(seed);
        let plans = day_plans(route_id, &route.drivers, &Local, date);

        let mut trips = 0;
        for plan in &plans {
            if self.cancel.is_cancelled() {
                break;
            }
            let mut config = TripConfig::batch(plan.start_ms);
            config.variation_factor = sample_variation_factor(rng.inner());
            config.seed = Some(rng.child_seed());
            self.apply_overrides(&mut config);

            self.run_trip(route, plan, config, false).await?;
            trips += 1;
        }
        info!(route = %route_id, day = %DayId::new(date), trips, "day finished");
        Ok(trips)
    }

    // ── Trips ─────────────────────────────────────────────────────────────

    async fn run_trip(
        &self,
        route: &Route,
        plan: &TripPlan,
        config: TripConfig,
        echo: bool,
    ) -> Result<TripSummary> {
        match &self.output {
            Some(writer) => {
                let reporter = CsvReporter::new(writer.clone(), offline_trip_id(plan));
                let trip_id = reporter.trip_id().clone();
                let summary = self.simulate(route, reporter, config, &trip_id).await?;
                let row = TripSummaryRow::new(&trip_id, plan, &summary);
                with_writer(writer, |w| w.write_trip_summary(&row))?;
                Ok(summary)
            }
            None => {
                let api = self.api()?;
                let registered = api.start_trip(plan).await.with_context(|| {
                    format!("registering the {} trip of {}", plan.start, plan.day)
                })?;
                let reporter = HttpReporter::new(api.clone(), registered).with_echo(echo);
                let trip_id = reporter.trip_id().clone();
                self.simulate(route, reporter, config, &trip_id).await
            }
        }
    }

    async fn simulate<R: LocationReporter>(
        &self,
        route: &Route,
        reporter: R,
        config: TripConfig,
        trip_id: &TripId,
    ) -> Result<TripSummary> {
        let summary = TripSimulator::new(route.clone(), reporter, config)?
            .with_cancel_token(self.cancel.clone())
            .with_label(trip_id.as_str())
            .run()
            .await
            .with_context(|| format!("trip {trip_id}"))?;
        Ok(summary)
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn api(&self) -> Result<&ApiClient> {
        self.api
            .as_ref()
            .context("no trip service configured: pass --api-base-url or set API_BASE_URL")
    }

    async fn route(&self, route_id: &RouteId) -> Result<Route> {
        match &self.route_file {
            Some(path) => load_route_json(path)
                .with_context(|| format!("loading route from {}", path.display())),
            None => self
                .api()?
                .route(route_id)
                .await
                .with_context(|| format!("fetching route {route_id}")),
        }
    }

    fn run_rng(&self) -> SimRng {
        match self.seed {
            Some(seed) => SimRng::new(seed),
            None => SimRng::from_entropy(),
        }
    }

    fn apply_overrides(&self, config: &mut TripConfig) {
        if let Some(secs) = self.report_timeout_secs {
            config.report_timeout_secs = Some(secs);
        }
    }

    fn finish(&self) -> Result<()> {
        if let Some(writer) = &self.output {
            with_writer(writer, |w| w.finish())?;
        }
        Ok(())
    }
}

/// Id of a trip that was never registered with the service:
/// `{route}-{yyyymmdd}-{HHMM}`.
pub fn offline_trip_id(plan: &TripPlan) -> TripId {
    TripId::new(format!(
        "{}-{}-{:02}{:02}",
        plan.route_id,
        plan.day,
        plan.start.hour(),
        plan.start.minute()
    ))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
