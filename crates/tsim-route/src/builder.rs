//! Build routes from coordinate polylines.

use tsim_core::{DriverId, LatLng};

use crate::{LinkData, PointData, Route, RouteData, RouteResult};

/// Fluent builder for [`Route`]s whose point distances are not known up
/// front.  Each link's `dist_from_prev` values and `length` are computed
/// with the haversine formula.
///
/// # Example
///
/// ```rust,ignore
/// let route = RouteBuilder::new("Depot", "Terminal")
///     .link("Depot", "Market", &[a, b, c], 180.0)
///     .link("Market", "Terminal", &[c, d], 90.0)
///     .drivers(["d1", "d2", "d3", "d4"])
///     .build()?;
/// ```
pub struct RouteBuilder {
    data: RouteData,
}

impl RouteBuilder {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            data: RouteData {
                origin: origin.into(),
                destination: destination.into(),
                links: Vec::new(),
                drivers: Vec::new(),
            },
        }
    }

    /// Append a link through `coords`, scheduled to take `base_duration`
    /// seconds.
    pub fn link(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        coords: &[LatLng],
        base_duration: f64,
    ) -> Self {
        let mut points = Vec::with_capacity(coords.len());
        let mut prev: Option<LatLng> = None;
        for &c in coords {
            let dist = prev.map_or(0.0, |p| p.distance_m(c));
            points.push(PointData { lat: c.lat, lng: c.lng, dist_from_prev: dist });
            prev = Some(c);
        }
        let length = points.iter().map(|p| p.dist_from_prev).sum();

        self.data.links.push(LinkData {
            from: from.into(),
            to: to.into(),
            points,
            length,
            base_duration,
        });
        self
    }

    /// Drivers per quarter-hour departure slot.
    pub fn drivers<I, D>(mut self, drivers: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<DriverId>,
    {
        self.data.drivers = drivers.into_iter().map(Into::into).collect();
        self
    }

    /// Validate and build the route.
    pub fn build(self) -> RouteResult<Route> {
        Route::new(self.data)
    }
}
