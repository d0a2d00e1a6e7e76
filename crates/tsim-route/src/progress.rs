//! The [`RouteProgress`] cursor.

use tsim_core::LatLng;

use crate::{DwellAllowance, Route};

/// An immutable position `(link_index, point_index)` on a [`Route`].
///
/// Every transition produces a new value; the cursor itself never mutates.
/// Derived flags:
///
/// | Flag           | Condition                                         |
/// |----------------|---------------------------------------------------|
/// | `start_of_link`| `point_index == 0`                                |
/// | `end_of_link`  | `point_index == last point of the current link`   |
/// | `ended`        | `end_of_link && link_index == last link`          |
///
/// A single-point link is both start and end of link at once.
#[derive(Clone, Debug)]
pub struct RouteProgress {
    route: Route,
    link_index: usize,
    point_index: usize,
}

impl RouteProgress {
    /// Cursor at the first point of the first link.
    pub fn start(route: Route) -> Self {
        Self { route, link_index: 0, point_index: 0 }
    }

    /// Iterator over every cursor from `(0, 0)` up to and including the
    /// terminal one.
    pub fn positions(route: Route) -> Positions {
        Positions { next: Some(Self::start(route)) }
    }

    // ── Position ──────────────────────────────────────────────────────────

    #[inline]
    pub fn link_index(&self) -> usize {
        self.link_index
    }

    #[inline]
    pub fn point_index(&self) -> usize {
        self.point_index
    }

    #[inline]
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Latitude/longitude of the current point.
    pub fn current_location(&self) -> LatLng {
        self.route.link(self.link_index).points[self.point_index].location()
    }

    // ── Flags ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn is_start_of_link(&self) -> bool {
        self.point_index == 0
    }

    #[inline]
    pub fn is_end_of_link(&self) -> bool {
        self.point_index + 1 == self.route.link(self.link_index).points.len()
    }

    #[inline]
    pub fn is_ended(&self) -> bool {
        self.is_end_of_link() && self.link_index + 1 == self.route.link_count()
    }

    // ── Look-ahead ────────────────────────────────────────────────────────

    /// Distance in metres from the current point to the next point of the
    /// same link.
    ///
    /// # Panics
    /// Panics at the end of a link; there is no next segment on this link.
    pub fn next_segment_length(&self) -> f64 {
        assert!(
            !self.is_end_of_link(),
            "next_segment_length called at end of link {}",
            self.link_index
        );
        self.route.link(self.link_index).points[self.point_index + 1].dist_from_prev
    }

    /// Moving speed (m/s) implied by the current link's schedule:
    ///
    ///   length / (base_duration − allowance)
    pub fn current_link_base_speed(&self, allowance: &DwellAllowance) -> f64 {
        let link = self.route.link(self.link_index);
        let dwell = allowance.allowance_secs(self.link_index, link.base_duration);
        link.length / (link.base_duration - dwell)
    }

    // ── Transition ────────────────────────────────────────────────────────

    /// The next cursor: the following point of this link, or point 0 of the
    /// next link when at the end of a link.
    ///
    /// # Panics
    /// Panics if the trip has already ended.
    pub fn move_next(&self) -> RouteProgress {
        assert!(!self.is_ended(), "move_next called on an ended trip");
        let (link_index, point_index) = if self.is_end_of_link() {
            (self.link_index + 1, 0)
        } else {
            (self.link_index, self.point_index + 1)
        };
        RouteProgress { route: self.route.clone(), link_index, point_index }
    }
}

// ── Positions ─────────────────────────────────────────────────────────────────

/// Iterator returned by [`RouteProgress::positions`].
pub struct Positions {
    next: Option<RouteProgress>,
}

impl Iterator for Positions {
    type Item = RouteProgress;

    fn next(&mut self) -> Option<RouteProgress> {
        let current = self.next.take()?;
        if !current.is_ended() {
            self.next = Some(current.move_next());
        }
        Some(current)
    }
}
