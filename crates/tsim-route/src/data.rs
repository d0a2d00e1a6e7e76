//! Route wire model, exactly as served by the route service.
//!
//! ```json
//! { "origin": "A", "destination": "B", "drivers": ["d1", "d2"],
//!   "links": [ { "from": "A", "to": "S1", "length": 812.0, "baseDuration": 120.0,
//!                "points": [ { "lat": 1.3, "lng": 103.8, "distFromPrev": 0.0 } ] } ] }
//! ```
//!
//! These types carry no invariants; wrap them in a [`Route`][crate::Route]
//! to validate.

use serde::{Deserialize, Serialize};

use tsim_core::{DriverId, LatLng};

/// One vertex of a link's polyline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointData {
    pub lat: f64,
    pub lng: f64,
    /// Metres from the previous point of the same link (0 for the first).
    pub dist_from_prev: f64,
}

impl PointData {
    #[inline]
    pub fn location(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// One scheduled segment of a route between two named stops.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkData {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    pub points: Vec<PointData>,
    /// Total link length in metres.
    pub length: f64,
    /// Scheduled traversal time in seconds, including any dwell allowance.
    pub base_duration: f64,
}

/// A complete route as returned by `GET /routes/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteData {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    pub links: Vec<LinkData>,
    /// Driver per quarter-hour departure slot (index = minute / 15).
    #[serde(default)]
    pub drivers: Vec<DriverId>,
}

impl RouteData {
    /// Sum of all scheduled link durations in seconds.
    pub fn scheduled_duration_secs(&self) -> f64 {
        self.links.iter().map(|l| l.base_duration).sum()
    }

    /// Sum of all link lengths in metres.
    pub fn length_m(&self) -> f64 {
        self.links.iter().map(|l| l.length).sum()
    }
}
