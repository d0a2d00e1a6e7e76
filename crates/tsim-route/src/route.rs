//! The validated, shareable [`Route`] and the dwell allowance used to derive
//! a link's moving speed.

use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{LinkData, RouteData, RouteError, RouteResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// A `RouteData` that passed validation, behind an `Arc`.
///
/// Cloning is a reference-count bump, so every [`RouteProgress`] cursor and
/// every concurrently simulated trip can hold its own handle to the same
/// polyline data.
///
/// Guarantees after construction:
///
/// - at least one link, and every link has at least one point;
/// - every coordinate, distance, length and duration is finite;
/// - point distances are non-negative;
/// - `base_duration > 0` for every link;
/// - `length > 0` for every link with more than one point.
///
/// [`RouteProgress`]: crate::RouteProgress
#[derive(Clone, Debug)]
pub struct Route(Arc<RouteData>);

impl Route {
    /// Validate `data` and wrap it.
    pub fn new(data: RouteData) -> RouteResult<Self> {
        validate(&data)?;
        Ok(Route(Arc::new(data)))
    }

    #[inline]
    pub fn data(&self) -> &RouteData {
        &self.0
    }

    #[inline]
    pub fn link(&self, index: usize) -> &LinkData {
        &self.0.links[index]
    }

    #[inline]
    pub fn link_count(&self) -> usize {
        self.0.links.len()
    }

    /// Total number of `(link, point)` positions on the route.
    pub fn position_count(&self) -> usize {
        self.0.links.iter().map(|l| l.points.len()).sum()
    }
}

impl Deref for Route {
    type Target = RouteData;

    fn deref(&self) -> &RouteData {
        &self.0
    }
}

impl TryFrom<RouteData> for Route {
    type Error = RouteError;

    fn try_from(data: RouteData) -> RouteResult<Self> {
        Route::new(data)
    }
}

fn validate(data: &RouteData) -> RouteResult<()> {
    if data.links.is_empty() {
        return Err(RouteError::invalid("route has no links"));
    }

    for (i, link) in data.links.iter().enumerate() {
        if link.points.is_empty() {
            return Err(RouteError::invalid(format!("link {i} has no points")));
        }
        if !(link.base_duration.is_finite() && link.base_duration > 0.0) {
            return Err(RouteError::invalid(format!(
                "link {i} has non-positive base duration {}",
                link.base_duration
            )));
        }
        if !(link.length.is_finite() && link.length >= 0.0) {
            return Err(RouteError::invalid(format!(
                "link {i} has invalid length {}",
                link.length
            )));
        }
        if link.points.len() > 1 && link.length == 0.0 {
            return Err(RouteError::invalid(format!(
                "link {i} has {} points but zero length",
                link.points.len()
            )));
        }
        for (j, point) in link.points.iter().enumerate() {
            if !point.location().is_finite() {
                return Err(RouteError::invalid(format!(
                    "link {i} point {j} has non-finite coordinates"
                )));
            }
            if !(point.dist_from_prev.is_finite() && point.dist_from_prev >= 0.0) {
                return Err(RouteError::invalid(format!(
                    "link {i} point {j} has invalid distance {}",
                    point.dist_from_prev
                )));
            }
        }
    }
    Ok(())
}

// ── DwellAllowance ────────────────────────────────────────────────────────────

/// How much of a link's scheduled duration is assumed to be stop dwell time.
///
/// Scheduled link durations include the expected dwell at the stop; removing
/// an estimate of it yields a moving speed for the random walk.  The first
/// link never carries an allowance, and neither do short hops scheduled
/// below `short_hop_threshold_secs`.  Otherwise:
///
///   allowance = min(max_secs, fraction × base_duration)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DwellAllowance {
    /// Links scheduled below this many seconds get no allowance.  Default: 60.
    pub short_hop_threshold_secs: f64,
    /// Upper bound of the allowance in seconds.  Default: 30.
    pub max_secs: f64,
    /// Share of the scheduled duration assumed to be dwell.  Default: 0.1.
    pub fraction: f64,
}

impl Default for DwellAllowance {
    fn default() -> Self {
        Self {
            short_hop_threshold_secs: 60.0,
            max_secs: 30.0,
            fraction: 0.1,
        }
    }
}

impl DwellAllowance {
    /// Reject values that could make a link's moving time non-positive.
    pub fn validate(&self) -> RouteResult<()> {
        if !(self.short_hop_threshold_secs.is_finite() && self.short_hop_threshold_secs >= 0.0) {
            return Err(RouteError::invalid("short-hop threshold must be a non-negative number"));
        }
        if !(self.max_secs.is_finite() && self.max_secs >= 0.0) {
            return Err(RouteError::invalid(
                "maximum dwell allowance must be a non-negative number",
            ));
        }
        if !(self.fraction.is_finite() && (0.0..1.0).contains(&self.fraction)) {
            return Err(RouteError::invalid("dwell allowance fraction must be in [0, 1)"));
        }
        Ok(())
    }

    /// Allowance in seconds for the link at `link_index` with `base_duration`.
    pub fn allowance_secs(&self, link_index: usize, base_duration: f64) -> f64 {
        if link_index == 0 || base_duration < self.short_hop_threshold_secs {
            0.0
        } else {
            self.max_secs.min(self.fraction * base_duration)
        }
    }
}
