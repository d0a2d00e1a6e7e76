//! `tsim-core`: foundational types for the `tsim` transit telemetry simulator.
//!
//! This crate is a dependency of every other `tsim-*` crate.  It has no
//! `tsim-*` dependencies and only small external ones (`rand`, `chrono`,
//! `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`ids`]   | `RouteId`, `TripId`, `DriverId`                           |
//! | [`geo`]   | `LatLng`, haversine distance                              |
//! | [`time`]  | `TripClock` (logical clock), `wall_clock_ms`              |
//! | [`rng`]   | `TripRng` (per-trip), `SimRng` (per-run)                  |

pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::LatLng;
pub use ids::{DriverId, RouteId, TripId};
pub use rng::{SimRng, TripRng};
pub use time::{TripClock, wall_clock_ms};
