//! Logical trip time.
//!
//! # Design
//!
//! A trip's clock starts at a Unix timestamp in milliseconds and advances by
//! the (fractional) duration of every completed step:
//!
//!   now_ms = start_ms + round(elapsed_secs * 1000)
//!
//! Elapsed time is kept as a running `f64` sum of step durations rather than
//! as an accumulated millisecond counter, so rounding happens once per read
//! and never accumulates across steps.  The clock only moves forward.

use std::fmt;

use chrono::Utc;

// ── TripClock ─────────────────────────────────────────────────────────────────

/// Logical clock of a single trip.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TripClock {
    /// Unix timestamp (milliseconds) at which the trip starts.
    start_ms: i64,
    /// Seconds of simulated time elapsed since `start_ms`.
    elapsed_secs: f64,
}

impl TripClock {
    /// Create a clock reading `start_ms`.
    pub fn new(start_ms: i64) -> Self {
        Self { start_ms, elapsed_secs: 0.0 }
    }

    /// Advance the clock by `secs` seconds of simulated time.
    ///
    /// # Panics
    /// Panics if `secs` is negative or not finite.
    #[inline]
    pub fn advance(&mut self, secs: f64) {
        assert!(
            secs.is_finite() && secs >= 0.0,
            "trip clock can only move forward (got {secs} s)"
        );
        self.elapsed_secs += secs;
    }

    #[inline]
    pub fn start_ms(&self) -> i64 {
        self.start_ms
    }

    /// Simulated seconds since the trip started.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Current logical Unix timestamp in milliseconds.
    #[inline]
    pub fn now_ms(&self) -> i64 {
        self.start_ms + (self.elapsed_secs * 1000.0).round() as i64
    }
}

impl fmt::Display for TripClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.elapsed_secs.max(0.0) as u64;
        write!(
            f,
            "t+{:02}:{:02}:{:02}",
            total / 3_600,
            (total % 3_600) / 60,
            total % 60
        )
    }
}

/// Current wall-clock time as Unix milliseconds.
pub fn wall_clock_ms() -> i64 {
    Utc::now().timestamp_millis()
}
