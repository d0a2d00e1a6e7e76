//! Plain data row types written by output backends.

use tsim_core::TripId;
use tsim_schedule::TripPlan;
use tsim_trip::{LocationReport, TripOutcome, TripSummary};

/// One location report of one trip.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRow {
    pub trip_id: TripId,
    /// Logical Unix time in milliseconds.
    pub time_ms: i64,
    pub lat:     f64,
    pub lng:     f64,
}

impl LocationRow {
    pub fn new(trip_id: &TripId, report: &LocationReport) -> Self {
        Self {
            trip_id: trip_id.clone(),
            time_ms: report.time,
            lat:     report.location.lat,
            lng:     report.location.lng,
        }
    }
}

/// What one trip was and how it went.
#[derive(Debug, Clone, PartialEq)]
pub struct TripSummaryRow {
    pub trip_id:        TripId,
    pub route_id:       String,
    /// `yyyymmdd`.
    pub day:            u32,
    /// `HH:MM`.
    pub start:          String,
    /// Empty when no driver was rostered.
    pub driver:         String,
    pub outcome:        TripOutcome,
    pub steps:          u64,
    pub reports_sent:   u64,
    pub reports_failed: u64,
    pub stops:          u64,
    pub travel_secs:    f64,
    pub dwell_secs:     f64,
    pub elapsed_secs:   f64,
    pub start_ms:       i64,
    pub end_ms:         i64,
}

impl TripSummaryRow {
    pub fn new(trip_id: &TripId, plan: &TripPlan, summary: &TripSummary) -> Self {
        Self {
            trip_id:        trip_id.clone(),
            route_id:       plan.route_id.to_string(),
            day:            plan.day.value(),
            start:          plan.start.to_string(),
            driver:         plan.driver.as_ref().map(|d| d.to_string()).unwrap_or_default(),
            outcome:        summary.outcome,
            steps:          summary.steps,
            reports_sent:   summary.reports_sent,
            reports_failed: summary.reports_failed,
            stops:          summary.stops,
            travel_secs:    summary.travel_secs,
            dwell_secs:     summary.dwell_secs,
            elapsed_secs:   summary.elapsed_secs,
            start_ms:       summary.start_ms,
            end_ms:         summary.end_ms,
        }
    }
}
