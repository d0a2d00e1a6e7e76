//! `tsim-route`: route data, validation, and trip progress.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`data`]     | `RouteData`, `LinkData`, `PointData` (JSON wire model)      |
//! | [`route`]    | `Route` (validated, shared), `DwellAllowance`               |
//! | [`builder`]  | `RouteBuilder`: routes from coordinate polylines            |
//! | [`progress`] | `RouteProgress`: immutable `(link, point)` cursor           |
//! | [`loader`]   | `load_route_json`, `load_route_reader`                      |
//! | [`error`]    | `RouteError`, `RouteResult<T>`                              |
//!
//! # Two-level path model
//!
//! A route is a sequence of links (stop → stop), each a polyline of points.
//! A trip walks every point of every link in order:
//!
//! ```text
//! (0,0) → (0,1) → … → (0,last) → (1,0) → … → (n-1,last)   ← ended
//!          travel          dwell at stop ┘
//! ```
//!
//! Moving off the last point of a link is the stop: the vehicle dwells there
//! and reappears at point 0 of the next link.

pub mod builder;
pub mod data;
pub mod error;
pub mod loader;
pub mod progress;
pub mod route;

#[cfg(test)]
mod tests;

pub use builder::RouteBuilder;
pub use data::{LinkData, PointData, RouteData};
pub use error::{RouteError, RouteResult};
pub use loader::{load_route_json, load_route_reader};
pub use progress::{Positions, RouteProgress};
pub use route::{DwellAllowance, Route};
