//! Trip plans: which trips a run generates and when each one starts.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;

use tsim_core::{DriverId, RouteId};

use crate::{DayId, ScheduleError, ScheduleResult, ScheduledStart, departures, driver_for};

/// Days between sampled dates of a month or period.
pub const SAMPLE_STEP_DAYS: u64 = 15;

/// Dates from `first` to `last` (inclusive) every `step_days`, keeping only
/// those strictly before `before` (usually today).
///
/// ```text
/// sample_dates(Mar 1, Mar 31, today = Apr 2, 15) → [Mar 1, Mar 16, Mar 31]
/// sample_dates(Mar 1, Mar 31, today = Mar 16, 15) → [Mar 1]
/// ```
///
/// # Panics
/// Panics if `step_days` is zero.
pub fn sample_dates(
    first: NaiveDate,
    last: NaiveDate,
    before: NaiveDate,
    step_days: u64,
) -> Vec<NaiveDate> {
    assert!(step_days > 0, "sample step must be at least one day");
    let mut out = Vec::new();
    let mut d = first;
    while d <= last && d < before {
        out.push(d);
        match d.checked_add_days(Days::new(step_days)) {
            Some(next) => d = next,
            None => break,
        }
    }
    out
}

// ── TripPlan ──────────────────────────────────────────────────────────────────

/// Everything needed to register and simulate one trip.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TripPlan {
    pub route_id: RouteId,
    pub day: DayId,
    pub start: ScheduledStart,
    /// `None` when the route's roster has no driver for this slot.
    pub driver: Option<DriverId>,
    /// Logical start time of the simulation (Unix ms).
    pub start_ms: i64,
}

impl TripPlan {
    /// The trip departing at local wall time `at` in `tz`.
    pub fn at<Tz: TimeZone>(
        route_id: &RouteId,
        drivers: &[DriverId],
        tz: &Tz,
        at: NaiveDateTime,
    ) -> ScheduleResult<Self> {
        let instant = tz
            .from_local_datetime(&at)
            .earliest()
            .ok_or(ScheduleError::NonexistentLocalTime(at))?;
        Ok(Self::from_instant(route_id, drivers, &instant))
    }

    /// The trip starting right now: scheduled at the nearest quarter hour,
    /// simulated from the exact instant `now`.
    pub fn starting_at<Tz: TimeZone>(
        route_id: &RouteId,
        drivers: &[DriverId],
        now: &DateTime<Tz>,
    ) -> Self {
        Self::from_instant(route_id, drivers, now)
    }

    fn from_instant<Tz: TimeZone>(
        route_id: &RouteId,
        drivers: &[DriverId],
        instant: &DateTime<Tz>,
    ) -> Self {
        let local = instant.naive_local();
        let start = ScheduledStart::nearest(local.time());
        TripPlan {
            route_id: route_id.clone(),
            day:      DayId::new(local.date()),
            start,
            driver:   driver_for(drivers, start).cloned(),
            start_ms: instant.timestamp_millis(),
        }
    }
}

/// One plan per departure of `date` (see [`departures`]), in `tz`.
///
/// Departures that fall into a daylight-saving gap are skipped.
pub fn day_plans<Tz: TimeZone>(
    route_id: &RouteId,
    drivers: &[DriverId],
    tz: &Tz,
    date: NaiveDate,
) -> Vec<TripPlan> {
    departures(date)
        .into_iter()
        .filter_map(|at| TripPlan::at(route_id, drivers, tz, at).ok())
        .collect()
}
