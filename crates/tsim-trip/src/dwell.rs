//! Passenger-driven dwell time at stops.
//!
//! ```text
//! boarding_secs  = boarding  × 6 s
//! alighting_secs = alighting × 2 s
//! dwell          = 0                                         if both are 0
//!                = max(boarding_secs, alighting_secs) + 5 s  otherwise
//! ```
//!
//! Doors open and close once per stop, and only when someone boards or
//! alights.  Boarding and alighting overlap (separate doors), hence `max`.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Whether a stop sees any passenger movement at all.
///
/// With `CoinFlip` each passenger count is multiplied by an independent 0/1
/// draw, so a share of stops is served with nobody boarding or alighting.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PassengerGate {
    /// Counts are used as drawn.
    Open,
    /// Each count survives with probability `open_probability`.
    CoinFlip { open_probability: f64 },
}

impl Default for PassengerGate {
    fn default() -> Self {
        PassengerGate::CoinFlip { open_probability: 0.5 }
    }
}

/// Passengers boarding and alighting at one stop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StopActivity {
    pub boarding: u32,
    pub alighting: u32,
}

/// Dwell-time model parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DwellModel {
    pub boarding_secs_per_passenger: f64,
    pub alighting_secs_per_passenger: f64,
    /// Door open + close overhead, once per served stop.
    pub door_cycle_secs: f64,
    /// Probability of drawing from the small group `[0, small_group_max]`.
    pub small_group_probability: f64,
    pub small_group_max: f64,
    /// Large groups are drawn from `[large_group_min, large_group_max]`.
    pub large_group_min: f64,
    pub large_group_max: f64,
    pub gate: PassengerGate,
}

impl Default for DwellModel {
    fn default() -> Self {
        Self {
            boarding_secs_per_passenger: 6.0,
            alighting_secs_per_passenger: 2.0,
            door_cycle_secs: 5.0,
            small_group_probability: 0.8,
            small_group_max: 4.0,
            large_group_min: 5.0,
            large_group_max: 10.0,
            gate: PassengerGate::default(),
        }
    }
}

impl DwellModel {
    /// Check that every parameter is usable; returns a description of the
    /// first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let non_negative = [
            ("boarding_secs_per_passenger", self.boarding_secs_per_passenger),
            ("alighting_secs_per_passenger", self.alighting_secs_per_passenger),
            ("door_cycle_secs", self.door_cycle_secs),
            ("small_group_max", self.small_group_max),
            ("large_group_min", self.large_group_min),
        ];
        for (name, v) in non_negative {
            if !(v.is_finite() && v >= 0.0) {
                return Err(format!("{name} must be a non-negative number, got {v}"));
            }
        }
        if !(self.large_group_max.is_finite() && self.large_group_max >= self.large_group_min) {
            return Err("large_group_max must not be below large_group_min".into());
        }
        if !(0.0..=1.0).contains(&self.small_group_probability) {
            return Err("small_group_probability must be in [0, 1]".into());
        }
        if let PassengerGate::CoinFlip { open_probability } = self.gate {
            if !(0.0..=1.0).contains(&open_probability) {
                return Err("gate open_probability must be in [0, 1]".into());
            }
        }
        Ok(())
    }

    /// Draw one passenger count, gate applied.
    pub fn sample_passengers<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let open = match self.gate {
            PassengerGate::Open => true,
            PassengerGate::CoinFlip { open_probability } => rng.gen_bool(open_probability),
        };
        // The count is drawn even when the gate is closed.
        let raw = if rng.gen_bool(self.small_group_probability) {
            rng.gen_range(0.0..=self.small_group_max)
        } else {
            rng.gen_range(self.large_group_min..=self.large_group_max)
        };
        if open { raw.round() as u32 } else { 0 }
    }

    /// Draw boarding and alighting counts for one stop.
    pub fn sample_stop<R: Rng + ?Sized>(&self, rng: &mut R) -> StopActivity {
        StopActivity {
            boarding: self.sample_passengers(rng),
            alighting: self.sample_passengers(rng),
        }
    }

    /// Dwell time in seconds for the given passenger movement.
    pub fn dwell_secs(&self, stop: StopActivity) -> f64 {
        let boarding = stop.boarding as f64 * self.boarding_secs_per_passenger;
        let alighting = stop.alighting as f64 * self.alighting_secs_per_passenger;
        if boarding > 0.0 || alighting > 0.0 {
            boarding.max(alighting) + self.door_cycle_secs
        } else {
            0.0
        }
    }
}
