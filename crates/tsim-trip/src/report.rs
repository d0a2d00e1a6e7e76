//! The location-report seam between the simulator and its sink.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tsim_core::LatLng;

/// One observation: where the vehicle is at logical time `time`.
///
/// Serializes as `{"location":{"lat":..,"lng":..},"time":<unix ms>}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationReport {
    pub location: LatLng,
    /// Logical Unix timestamp in milliseconds.
    pub time: i64,
}

/// Why a report was not accepted.
#[derive(Debug, Clone, Error)]
pub enum ReportError {
    #[error("report rejected by sink: {0}")]
    Rejected(String),

    #[error("report transport failed: {0}")]
    Transport(String),

    #[error("report not acknowledged within {0:?}")]
    Timeout(Duration),
}

/// Destination for a trip's location reports.
///
/// The simulator awaits every call before taking its next step, so a
/// reporter sees a single trip's reports one at a time, in non-decreasing
/// logical time.  Reporters do not retry on behalf of the
/// simulator; what a failure means is decided by the trip's
/// [`ReportFailurePolicy`][crate::ReportFailurePolicy].
///
/// Implementations may use `async fn`:
///
/// ```rust,ignore
/// impl LocationReporter for Printer {
///     async fn report(&mut self, report: LocationReport) -> Result<(), ReportError> {
///         println!("{} @ {}", report.location, report.time);
///         Ok(())
///     }
/// }
/// ```
pub trait LocationReporter {
    fn report(
        &mut self,
        report: LocationReport,
    ) -> impl Future<Output = Result<(), ReportError>> + Send;
}

impl<R: LocationReporter + ?Sized> LocationReporter for &mut R {
    fn report(
        &mut self,
        report: LocationReport,
    ) -> impl Future<Output = Result<(), ReportError>> + Send {
        (**self).report(report)
    }
}

// ── Closure adapter ───────────────────────────────────────────────────────────

/// A [`LocationReporter`] backed by a closure returning a future.
pub struct FnReporter<F>(F);

/// Wrap `f` as a [`LocationReporter`].
///
/// ```rust,ignore
/// let reporter = reporter_fn(|report| async move {
///     tracing::info!(?report);
///     Ok(())
/// });
/// ```
pub fn reporter_fn<F, Fut>(f: F) -> FnReporter<F>
where
    F: FnMut(LocationReport) -> Fut,
    Fut: Future<Output = Result<(), ReportError>> + Send,
{
    FnReporter(f)
}

impl<F, Fut> LocationReporter for FnReporter<F>
where
    F: FnMut(LocationReport) -> Fut,
    Fut: Future<Output = Result<(), ReportError>> + Send,
{
    fn report(
        &mut self,
        report: LocationReport,
    ) -> impl Future<Output = Result<(), ReportError>> + Send {
        (self.0)(report)
    }
}
