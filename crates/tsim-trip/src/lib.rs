//! `tsim-trip`: drive a vehicle along a route and emit location reports.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`speed`]     | `SpeedModel`: bounded random walk around a link's base speed   |
//! | [`dwell`]     | `DwellModel`, `PassengerGate`, `StopActivity`                  |
//! | [`report`]    | `LocationReport`, `LocationReporter`, `reporter_fn`            |
//! | [`config`]    | `TripConfig`, `ReportFailurePolicy`                            |
//! | [`cancel`]    | `CancelToken`                                                  |
//! | [`simulator`] | `TripSimulator`, `TripSummary`, `TripOutcome`                  |
//! | [`error`]     | `TripError`, `TripResult<T>`                                   |
//!
//! # Timing model
//!
//! Every step has a duration in simulated seconds:
//!
//! - **travel** between two points of a link: `segment_length / speed`, with
//!   `speed` drawn from the [`SpeedModel`];
//! - **dwell** when moving off the last point of a link (a stop): drawn from
//!   the [`DwellModel`].
//!
//! The logical clock advances by exactly that duration.  In real-time mode
//! the simulator also sleeps `duration / acceleration_rate` of wall-clock
//! time and reports every step; in batch mode it never sleeps and reports
//! only at link boundaries.
//!
//! # Quick start
//!
//! ```rust,ignore
//! let reporter = reporter_fn(|report| async move {
//!     println!("{} @ {}", report.location, report.time);
//!     Ok(())
//! });
//! let summary = TripSimulator::new(route, reporter, TripConfig::batch(start_ms))?
//!     .run()
//!     .await?;
//! ```

pub mod cancel;
pub mod config;
pub mod dwell;
pub mod error;
pub mod report;
pub mod simulator;
pub mod speed;


pub use cancel::CancelToken;
pub use config::{ReportFailurePolicy, TripConfig};
pub use dwell::{DwellModel, PassengerGate, StopActivity};
pub use error::{TripError, TripResult};
pub use report::{FnReporter, LocationReport, LocationReporter, ReportError, reporter_fn};
pub use simulator::{TripOutcome, TripSimulator, TripSummary};
pub use speed::{SpeedModel, sample_variation_factor, travel_secs};
