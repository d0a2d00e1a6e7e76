//! Bounded random-walk speed model.

use rand::Rng;

/// Random walk of a vehicle's speed around a link's base speed.
///
/// Each step multiplies the previous speed by `1 + r`, `r ~ U[-max_change_ratio,
/// +max_change_ratio]`, then clamps to
/// `[base / variation_factor, base × variation_factor]`.  Only the previous
/// speed carries over between steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedModel {
    /// How far speed may drift from base (> 1).
    pub variation_factor: f64,
    /// Largest relative change per step.  Default: 0.1.
    pub max_change_ratio: f64,
}

impl Default for SpeedModel {
    fn default() -> Self {
        Self { variation_factor: 1.5, max_change_ratio: 0.1 }
    }
}

impl SpeedModel {
    pub fn new(variation_factor: f64, max_change_ratio: f64) -> Self {
        Self { variation_factor, max_change_ratio }
    }

    /// `(min_speed, max_speed)` around `base_speed`.
    #[inline]
    pub fn bounds(&self, base_speed: f64) -> (f64, f64) {
        (base_speed / self.variation_factor, base_speed * self.variation_factor)
    }

    /// Draw the speed for the next segment.
    pub fn next_speed<R: Rng + ?Sized>(&self, current: f64, base_speed: f64, rng: &mut R) -> f64 {
        let r = self.max_change_ratio;
        let ratio = rng.gen_range(-r..=r);
        self.apply(current, base_speed, ratio)
    }

    /// Apply a given change ratio to `current` and clamp to the bounds.
    #[inline]
    pub fn apply(&self, current: f64, base_speed: f64, ratio: f64) -> f64 {
        let (min, max) = self.bounds(base_speed);
        (current * (1.0 + ratio)).clamp(min, max)
    }
}

/// Seconds needed to cover `distance_m` at `speed_mps`.
#[inline]
pub fn travel_secs(distance_m: f64, speed_mps: f64) -> f64 {
    distance_m / speed_mps
}

/// Per-trip variation factor used by batch generation: most trips run close
/// to schedule, some drift a lot.
///
/// | Draw `x = 10·U[0,1)` | Factor |
/// |----------------------|--------|
/// | `x ≤ 7`              | 1.3    |
/// | `7 < x ≤ 9`          | 2.0    |
/// | `x > 9`              | 3.0    |
pub fn sample_variation_factor<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let x = 10.0 * rng.r#gen::<f64>();
    if x <= 7.0 {
        1.3
    } else if x <= 9.0 {
        2.0
    } else {
        3.0
    }
}
