//! Per-trip and run-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! A run may be given a master seed, which seeds one `SimRng`.  The
//! orchestrator draws a child seed from it for every trip it builds, and each
//! trip owns a `TripRng` seeded from that child seed.  Trips simulated
//! concurrently therefore never share RNG state, and the same master seed
//! reproduces the same set of trips.  Without a master seed every RNG is
//! seeded from OS entropy.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// ── TripRng ───────────────────────────────────────────────────────────────────

/// Randomness source owned by a single trip simulation.
pub struct TripRng(SmallRng);

impl TripRng {
    /// Seed deterministically.
    pub fn seeded(seed: u64) -> Self {
        TripRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy.
    pub fn from_entropy() -> Self {
        TripRng(SmallRng::from_entropy())
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Run-level RNG used by orchestration (per-trip variation factors and child
/// seeds).  Used only from the single task that builds trip plans.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    /// Draw a seed for a child `TripRng`.
    #[inline]
    pub fn child_seed(&mut self) -> u64 {
        self.0.r#gen()
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}
