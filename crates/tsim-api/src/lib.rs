//! `tsim-api`: HTTP collaborator of the simulator.
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`client`]   | `ApiConfig`, `ApiClient`, `TripFilter`, `AnalyticsScope`     |
//! | [`reporter`] | `HttpReporter`: `LocationReporter` over `POST /location`     |
//! | [`error`]    | `ApiError`, `ApiResult<T>`                                   |
//!
//! # Endpoints
//!
//! | Call            | Request                                        |
//! |-----------------|------------------------------------------------|
//! | `route`         | `GET    /routes/{routeId}`                     |
//! | `cleanup`       | `POST   /cleanup`                              |
//! | `start_trip`    | `POST   /trip?route=&day=&start=&driver=`      |
//! | `post_location` | `POST   /location/{tripId}`                    |
//! | `delete_trips`  | `DELETE /trip?trip=` / `?month=` / `?period=`  |
//! | `analytics`     | `POST   /analytics?month=` / `?period=`        |
//!
//! Nothing here retries: a failed call is returned to the caller.

pub mod client;
pub mod error;
pub mod reporter;


pub use client::{AnalyticsScope, ApiClient, ApiConfig, TripFilter};
pub use error::{ApiError, ApiResult};
pub use reporter::HttpReporter;
