//! The `TripSimulator` and its step loop.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use tsim_core::{TripClock, TripRng, wall_clock_ms};
use tsim_route::{Route, RouteProgress};

use crate::speed::travel_secs;
use crate::{
    CancelToken, LocationReport, LocationReporter, ReportError, ReportFailurePolicy, SpeedModel,
    StopActivity, TripConfig, TripError, TripResult,
};

// ── Results ───────────────────────────────────────────────────────────────────

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TripOutcome {
    /// The vehicle reached the last point of the last link.
    Completed,
    /// The [`CancelToken`] fired first.
    Cancelled,
}

/// What happened during a run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TripSummary {
    pub outcome: TripOutcome,
    /// Transitions taken (travel segments + stops).
    pub steps: u64,
    pub reports_sent: u64,
    /// Reports that failed under [`ReportFailurePolicy::Continue`].
    pub reports_failed: u64,
    /// Stops passed, i.e. link-to-link transitions.
    pub stops: u64,
    /// Simulated seconds spent moving.
    pub travel_secs: f64,
    /// Simulated seconds spent dwelling at stops.
    pub dwell_secs: f64,
    /// `travel_secs + dwell_secs`.
    pub elapsed_secs: f64,
    pub start_ms: i64,
    pub end_ms: i64,
}

/// The duration of one step and what the vehicle did during it.
#[derive(Clone, Copy)]
enum Step {
    Travel { secs: f64, speed: f64 },
    Dwell { secs: f64, stop: StopActivity },
}

impl Step {
    fn secs(&self) -> f64 {
        match *self {
            Step::Travel { secs, .. } | Step::Dwell { secs, .. } => secs,
        }
    }
}

#[derive(Default)]
struct Counters {
    steps: u64,
    reports_sent: u64,
    reports_failed: u64,
    stops: u64,
    travel_secs: f64,
    dwell_secs: f64,
}

// ── TripSimulator ─────────────────────────────────────────────────────────────

/// Drives one vehicle along a [`Route`], emitting [`LocationReport`]s.
///
/// Each step of [`run`][Self::run]:
///
/// 1. **Report** the current location (every step in real-time mode; only at
///    link boundaries in batch mode).  The report is awaited before anything
///    else happens.
/// 2. **Stop** if the route has ended.
/// 3. **Duration**: dwell time at the end of a link, travel time otherwise.
/// 4. **Wait** `duration / acceleration_rate` of wall-clock time (real-time)
///    or just yield (batch).
/// 5. **Advance** the cursor and add `duration` to the logical clock.
///
/// The cancel token is checked before step 1 and raced against step 4.
pub struct TripSimulator<R: LocationReporter> {
    progress: RouteProgress,
    reporter: R,
    config: TripConfig,
    speed_model: SpeedModel,
    rng: TripRng,
    clock: TripClock,
    /// `None` until the first travel segment.
    current_speed: Option<f64>,
    cancel: CancelToken,
    label: String,
}

impl<R: LocationReporter> TripSimulator<R> {
    /// Validate `config` and position a vehicle at the start of `route`.
    pub fn new(route: Route, reporter: R, config: TripConfig) -> TripResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => TripRng::seeded(seed),
            None => TripRng::from_entropy(),
        };
        let clock = TripClock::new(config.trip_start_ms.unwrap_or_else(wall_clock_ms));
        Ok(Self {
            progress:      RouteProgress::start(route),
            reporter,
            speed_model:   config.speed_model(),
            config,
            rng,
            clock,
            current_speed: None,
            cancel:        CancelToken::new(),
            label:         String::new(),
        })
    }

    /// Use an existing token, e.g. one shared by every trip of a run.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Name used in log events, typically the trip id.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// A handle that stops this trip.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn progress(&self) -> &RouteProgress {
        &self.progress
    }

    pub fn config(&self) -> &TripConfig {
        &self.config
    }

    /// Logical time of the current position (Unix ms).
    pub fn current_time_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Speed used on the last travel segment (m/s).
    pub fn current_speed(&self) -> Option<f64> {
        self.current_speed
    }

    // ── Run loop ──────────────────────────────────────────────────────────

    /// Drive the trip to completion or cancellation.
    ///
    /// Returns `Err` only on configuration problems caught at construction
    /// or on a report failure under [`ReportFailurePolicy::Abort`].
    pub async fn run(mut self) -> TripResult<TripSummary> {
        let realtime = self.config.realtime;
        let timeout = self.config.report_timeout();
        let mut counters = Counters::default();

        info!(
            trip = %self.label,
            start_ms = self.clock.start_ms(),
            links = self.progress.route().link_count(),
            length_m = self.progress.route().length_m(),
            scheduled_secs = self.progress.route().scheduled_duration_secs(),
            realtime,
            "trip started"
        );

        let outcome = loop {
            if self.cancel.is_cancelled() {
                break TripOutcome::Cancelled;
            }

            let at_boundary = self.progress.is_start_of_link() || self.progress.is_end_of_link();
            if realtime || at_boundary {
                self.emit(timeout, &mut counters).await?;
            }

            if self.progress.is_ended() {
                break TripOutcome::Completed;
            }

            let step = self.next_step();
            let secs = step.secs();

            if realtime {
                let delay = Duration::try_from_secs_f64(secs / self.config.acceleration_rate)
                    .unwrap_or(Duration::MAX);
                let cancelled = tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => true,
                    _ = tokio::time::sleep(delay) => false,
                };
                if cancelled {
                    break TripOutcome::Cancelled;
                }
            } else {
                tokio::task::yield_now().await;
            }

            let (link, point) = (self.progress.link_index(), self.progress.point_index());
            match step {
                Step::Travel { secs, speed } => {
                    debug!(
                        trip = %self.label,
                        link,
                        point,
                        clock = %self.clock,
                        secs,
                        speed,
                        "travel"
                    );
                    counters.travel_secs += secs;
                }
                Step::Dwell { secs, stop } => {
                    debug!(
                        trip = %self.label,
                        link,
                        clock = %self.clock,
                        secs,
                        boarding = stop.boarding,
                        alighting = stop.alighting,
                        "dwell"
                    );
                    counters.dwell_secs += secs;
                    counters.stops += 1;
                }
            }
            counters.steps += 1;
            self.progress = self.progress.move_next();
            self.clock.advance(secs);
        };

        let summary = TripSummary {
            outcome,
            steps:          counters.steps,
            reports_sent:   counters.reports_sent,
            reports_failed: counters.reports_failed,
            stops:          counters.stops,
            travel_secs:    counters.travel_secs,
            dwell_secs:     counters.dwell_secs,
            elapsed_secs:   self.clock.elapsed_secs(),
            start_ms:       self.clock.start_ms(),
            end_ms:         self.clock.now_ms(),
        };
        info!(
            trip = %self.label,
            outcome = ?summary.outcome,
            steps = summary.steps,
            reports = summary.reports_sent,
            failed = summary.reports_failed,
            elapsed = %self.clock,
            "trip finished"
        );
        Ok(summary)
    }

    // ── Step pieces ───────────────────────────────────────────────────────

    /// Report the current location, applying the timeout and failure policy.
    async fn emit(&mut self, timeout: Option<Duration>, counters: &mut Counters) -> TripResult<()> {
        let report = LocationReport {
            location: self.progress.current_location(),
            time:     self.clock.now_ms(),
        };
        let result = match timeout {
            Some(limit) => tokio::time::timeout(limit, self.reporter.report(report))
                .await
                .unwrap_or(Err(ReportError::Timeout(limit))),
            None => self.reporter.report(report).await,
        };

        match result {
            Ok(()) => {
                counters.reports_sent += 1;
                Ok(())
            }
            Err(source) => match self.config.on_report_failure {
                ReportFailurePolicy::Abort => Err(TripError::Report { time: report.time, source }),
                ReportFailurePolicy::Continue => {
                    warn!(
                        trip = %self.label,
                        time = report.time,
                        error = %source,
                        "location report failed"
                    );
                    counters.reports_failed += 1;
                    Ok(())
                }
            },
        }
    }

    /// Dwell at the end of a link, otherwise travel one segment.
    fn next_step(&mut self) -> Step {
        if self.progress.is_end_of_link() {
            let stop = self.config.dwell.sample_stop(self.rng.inner());
            Step::Dwell { secs: self.config.dwell.dwell_secs(stop), stop }
        } else {
            let base = self.progress.current_link_base_speed(&self.config.allowance);
            // Each link's walk starts from its own base speed.
            let current = match self.current_speed {
                Some(speed) if !self.progress.is_start_of_link() => speed,
                _ => base,
            };
            let speed = self.speed_model.next_speed(current, base, self.rng.inner());
            self.current_speed = Some(speed);
            Step::Travel { secs: travel_secs(self.progress.next_segment_length(), speed), speed }
        }
    }
}
