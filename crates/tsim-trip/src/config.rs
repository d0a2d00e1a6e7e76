//! Per-trip configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use tsim_route::DwellAllowance;

use crate::{DwellModel, SpeedModel, TripError, TripResult};

/// What a trip does when the reporter fails or times out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFailurePolicy {
    /// Stop the trip and return [`TripError::Report`][crate::TripError::Report].
    #[default]
    Abort,
    /// Log, count, and keep driving.
    Continue,
}

/// Configuration of one [`TripSimulator`][crate::TripSimulator] run.
///
/// Every field has a default, so a partial JSON/TOML document deserializes
/// into a complete config:
///
/// ```rust,ignore
/// let config: TripConfig = serde_json::from_str(r#"{ "realtime": false }"#)?;
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripConfig {
    /// Logical start time (Unix ms).  `None` → wall-clock time when the
    /// simulator is created.
    pub trip_start_ms: Option<i64>,
    /// Real-time delays are divided by this.  Must be > 0.
    pub acceleration_rate: f64,
    /// `true`: report every step and wait between steps.
    /// `false`: report at link boundaries only, no waiting.
    pub realtime: bool,
    /// Speed stays within `[base / f, base × f]`.  Must be > 1.
    pub variation_factor: f64,
    /// Largest relative speed change per segment.
    pub max_speed_change: f64,
    pub dwell: DwellModel,
    pub allowance: DwellAllowance,
    /// Bound on each report call.  `None` waits indefinitely.
    pub report_timeout_secs: Option<f64>,
    pub on_report_failure: ReportFailurePolicy,
    /// Seed for the trip's RNG.  `None` → OS entropy.
    pub seed: Option<u64>,
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            trip_start_ms:       None,
            acceleration_rate:   1.0,
            realtime:            true,
            variation_factor:    1.5,
            max_speed_change:    0.1,
            dwell:               DwellModel::default(),
            allowance:           DwellAllowance::default(),
            report_timeout_secs: Some(30.0),
            on_report_failure:   ReportFailurePolicy::Abort,
            seed:                None,
        }
    }
}

impl TripConfig {
    /// Batch-mode config starting at `start_ms`.
    pub fn batch(start_ms: i64) -> Self {
        Self { trip_start_ms: Some(start_ms), realtime: false, ..Self::default() }
    }

    /// Real-time config running `acceleration_rate` times faster than
    /// wall-clock time.
    pub fn realtime(acceleration_rate: f64) -> Self {
        Self { acceleration_rate, realtime: true, ..Self::default() }
    }

    /// Check every field; the error names the first problem found.
    pub fn validate(&self) -> TripResult<()> {
        self.check().map_err(TripError::Config)?;
        self.allowance.validate().map_err(|e| TripError::Config(e.to_string()))
    }

    fn check(&self) -> Result<(), String> {
        if !(self.acceleration_rate.is_finite() && self.acceleration_rate > 0.0) {
            return Err(format!(
                "acceleration_rate must be a positive number, got {}",
                self.acceleration_rate
            ));
        }
        if !(self.variation_factor.is_finite() && self.variation_factor > 1.0) {
            return Err(format!(
                "variation_factor must be greater than 1, got {}",
                self.variation_factor
            ));
        }
        if !(self.max_speed_change.is_finite() && (0.0..1.0).contains(&self.max_speed_change)) {
            return Err(format!(
                "max_speed_change must be in [0, 1), got {}",
                self.max_speed_change
            ));
        }
        if let Some(t) = self.report_timeout_secs {
            if !(t > 0.0 && Duration::try_from_secs_f64(t).is_ok()) {
                return Err(format!("report_timeout_secs must be positive, got {t}"));
            }
        }
        self.dwell.validate()
    }

    pub fn speed_model(&self) -> SpeedModel {
        SpeedModel::new(self.variation_factor, self.max_speed_change)
    }

    pub fn report_timeout(&self) -> Option<Duration> {
        self.report_timeout_secs.map(Duration::from_secs_f64)
    }
}
