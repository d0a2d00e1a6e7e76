//! Unit tests for tsim-route.
//!
//! All tests use hand-written routes so they run without the route service.

#[cfg(test)]
mod helpers {
    use crate::{LinkData, PointData, Route, RouteData};

    pub fn point(lat: f64, lng: f64, dist: f64) -> PointData {
        PointData { lat, lng, dist_from_prev: dist }
    }

    pub fn link(points: Vec<PointData>, length: f64, base_duration: f64) -> LinkData {
        LinkData { from: String::new(), to: String::new(), points, length, base_duration }
    }

    pub fn data(links: Vec<LinkData>) -> RouteData {
        RouteData {
            origin: "A".into(),
            destination: "C".into(),
            links,
            drivers: vec![],
        }
    }

    /// Two links sharing the boundary stop B:
    ///   link 0: A(0,0) → (0,1) → B(0,2)        lengths 100 + 100, 20 s
    ///   link 1: B(0,2) → (0,3) → (0,4) → C(0,5) lengths 50 × 3,   150 s
    pub fn two_link_route() -> Route {
        Route::new(data(vec![
            link(
                vec![point(0.0, 0.0, 0.0), point(0.0, 1.0, 100.0), point(0.0, 2.0, 100.0)],
                200.0,
                20.0,
            ),
            link(
                vec![
                    point(0.0, 2.0, 0.0),
                    point(0.0, 3.0, 50.0),
                    point(0.0, 4.0, 50.0),
                    point(0.0, 5.0, 50.0),
                ],
                150.0,
                150.0,
            ),
        ]))
        .unwrap()
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use super::helpers::*;
    use crate::{Route, RouteError};

    fn reason(result: Result<Route, RouteError>) -> String {
        match result {
            Err(RouteError::InvalidRouteData { reason }) => reason,
            other => panic!("expected InvalidRouteData, got {other:?}"),
        }
    }

    #[test]
    fn accepts_valid_route() {
        let route = two_link_route();
        assert_eq!(route.link_count(), 2);
        assert_eq!(route.position_count(), 7);
    }

    #[test]
    fn rejects_empty_route() {
        assert!(reason(Route::new(data(vec![]))).contains("no links"));
    }

    #[test]
    fn rejects_empty_link() {
        let r = Route::new(data(vec![link(vec![], 0.0, 10.0)]));
        assert!(reason(r).contains("no points"));
    }

    #[test]
    fn rejects_non_positive_duration() {
        let r = Route::new(data(vec![link(vec![point(0.0, 0.0, 0.0)], 0.0, 0.0)]));
        assert!(reason(r).contains("base duration"));
    }

    #[test]
    fn rejects_zero_length_multi_point_link() {
        let r = Route::new(data(vec![link(
            vec![point(0.0, 0.0, 0.0), point(0.0, 0.0, 0.0)],
            0.0,
            10.0,
        )]));
        assert!(reason(r).contains("zero length"));
    }

    #[test]
    fn single_point_link_may_have_zero_length() {
        assert!(Route::new(data(vec![link(vec![point(0.0, 0.0, 0.0)], 0.0, 10.0)])).is_ok());
    }

    #[test]
    fn rejects_negative_distance() {
        let r = Route::new(data(vec![link(
            vec![point(0.0, 0.0, 0.0), point(0.0, 1.0, -5.0)],
            5.0,
            10.0,
        )]));
        assert!(reason(r).contains("invalid distance"));
    }

    #[test]
    fn rejects_nan_coordinates() {
        let r = Route::new(data(vec![link(vec![point(f64::NAN, 0.0, 0.0)], 0.0, 10.0)]));
        assert!(reason(r).contains("non-finite"));
    }
}

// ── DwellAllowance ────────────────────────────────────────────────────────────

#[cfg(test)]
mod allowance {
    use crate::DwellAllowance;

    #[test]
    fn first_link_has_none() {
        assert_eq!(DwellAllowance::default().allowance_secs(0, 600.0), 0.0);
    }

    #[test]
    fn short_hop_has_none() {
        let a = DwellAllowance::default();
        assert_eq!(a.allowance_secs(3, 59.0), 0.0);
        // a link scheduled exactly at the threshold gets one
        assert!((a.allowance_secs(3, 60.0) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn capped_at_max() {
        let a = DwellAllowance::default();
        assert!((a.allowance_secs(1, 200.0) - 20.0).abs() < 1e-12);
        assert_eq!(a.allowance_secs(1, 1_000.0), 30.0);
    }

    #[test]
    fn threshold_is_configurable() {
        let a = DwellAllowance { short_hop_threshold_secs: 120.0, ..Default::default() };
        assert_eq!(a.allowance_secs(1, 100.0), 0.0);
        assert!((a.allowance_secs(1, 120.0) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_full_fraction() {
        let a = DwellAllowance { fraction: 1.0, ..Default::default() };
        assert!(a.validate().is_err());
        assert!(DwellAllowance::default().validate().is_ok());
    }
}

// ── RouteProgress ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod progress {
    use super::helpers::*;
    use crate::{DwellAllowance, Route, RouteProgress};

    #[test]
    fn starts_at_origin() {
        let p = RouteProgress::start(two_link_route());
        assert_eq!((p.link_index(), p.point_index()), (0, 0));
        assert!(p.is_start_of_link());
        assert!(!p.is_end_of_link());
        assert!(!p.is_ended());
        assert_eq!(p.current_location(), tsim_core::LatLng::new(0.0, 0.0));
    }

    #[test]
    fn boundary_moves_to_next_link_start() {
        let p = RouteProgress::start(two_link_route()).move_next().move_next();
        assert_eq!((p.link_index(), p.point_index()), (0, 2));
        assert!(p.is_end_of_link());
        assert!(!p.is_ended());

        let q = p.move_next();
        assert_eq!((q.link_index(), q.point_index()), (1, 0));
        assert!(q.is_start_of_link());
        // p is untouched
        assert_eq!(p.point_index(), 2);
    }

    #[test]
    fn next_segment_length_reads_next_point() {
        let p = RouteProgress::start(two_link_route());
        assert_eq!(p.next_segment_length(), 100.0);
        let q = p.move_next().move_next().move_next(); // (1,0)
        assert_eq!(q.next_segment_length(), 50.0);
    }

    #[test]
    #[should_panic(expected = "end of link")]
    fn next_segment_length_at_end_of_link_panics() {
        let p = RouteProgress::start(two_link_route()).move_next().move_next();
        p.next_segment_length();
    }

    #[test]
    #[should_panic(expected = "ended trip")]
    fn move_next_past_end_panics() {
        let last = RouteProgress::positions(two_link_route()).last().unwrap();
        assert!(last.is_ended());
        last.move_next();
    }

    #[test]
    fn base_speed_first_link_ignores_allowance() {
        let p = RouteProgress::start(two_link_route());
        // 200 m / 20 s
        assert!((p.current_link_base_speed(&DwellAllowance::default()) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn base_speed_later_link_subtracts_allowance() {
        let q = RouteProgress::start(two_link_route()).move_next().move_next().move_next();
        // 150 s ≥ 60 s → allowance = min(30, 15) = 15 → 150 m / 135 s
        let speed = q.current_link_base_speed(&DwellAllowance::default());
        assert!((speed - 150.0 / 135.0).abs() < 1e-12);

        let long_threshold =
            DwellAllowance { short_hop_threshold_secs: 200.0, ..Default::default() };
        assert!((q.current_link_base_speed(&long_threshold) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn visits_every_position_once_in_order() {
        let route = two_link_route();
        let visited: Vec<(usize, usize)> = RouteProgress::positions(route.clone())
            .map(|p| (p.link_index(), p.point_index()))
            .collect();
        assert_eq!(
            visited,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (1, 3)]
        );
        // 3 + 4 points → 6 transitions.
        let mut p = RouteProgress::start(route.clone());
        let mut transitions = 0;
        while !p.is_ended() {
            p = p.move_next();
            transitions += 1;
        }
        assert_eq!(transitions, 6);
        assert_eq!(route.position_count(), 7);
        assert!(visited.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn shared_boundary_points_counted_once() {
        let route = two_link_route();
        let mut locations: Vec<(u64, u64)> = RouteProgress::positions(route.clone())
            .map(|p| {
                let l = p.current_location();
                (l.lat.to_bits(), l.lng.to_bits())
            })
            .collect();
        locations.dedup();
        // Σ points − (links − 1)
        assert_eq!(locations.len(), route.position_count() - (route.link_count() - 1));
    }

    #[test]
    fn single_point_links_are_start_and_end() {
        let route = Route::new(data(vec![
            link(vec![point(0.0, 0.0, 0.0)], 0.0, 10.0),
            link(vec![point(0.0, 1.0, 0.0)], 0.0, 10.0),
        ]))
        .unwrap();
        let p = RouteProgress::start(route.clone());
        assert!(p.is_start_of_link() && p.is_end_of_link() && !p.is_ended());
        let q = p.move_next();
        assert!(q.is_ended());
        assert_eq!(RouteProgress::positions(route).count(), 2);
    }
}

// ── Builder & loader ──────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use tsim_core::LatLng;

    use crate::RouteBuilder;

    #[test]
    fn computes_distances_and_length() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(0.001, 0.0);
        let c = LatLng::new(0.002, 0.0);
        let route = RouteBuilder::new("A", "C")
            .link("A", "C", &[a, b, c], 60.0)
            .drivers(["d1", "d2"])
            .build()
            .unwrap();

        let link = route.link(0);
        assert_eq!(link.points[0].dist_from_prev, 0.0);
        assert!((link.points[1].dist_from_prev - 111.2).abs() < 0.5);
        assert!((link.length - 2.0 * link.points[1].dist_from_prev).abs() < 0.5);
        assert_eq!(route.drivers.len(), 2);
    }

    #[test]
    fn build_validates() {
        assert!(RouteBuilder::new("A", "B").build().is_err());
    }
}

#[cfg(test)]
mod loader {
    use std::io::Write;

    use crate::{load_route_json, load_route_reader, RouteError};

    const ROUTE_JSON: &str = r#"{
        "origin": "A",
        "destination": "B",
        "drivers": ["d1", "d2", "d3", "d4"],
        "links": [
            { "from": "A", "to": "B", "length": 100.0, "baseDuration": 30.0,
              "points": [
                { "lat": 1.0, "lng": 2.0, "distFromPrev": 0.0 },
                { "lat": 1.001, "lng": 2.0, "distFromPrev": 100.0 }
              ] }
        ]
    }"#;

    #[test]
    fn reads_camel_case_wire_format() {
        let route = load_route_reader(ROUTE_JSON.as_bytes()).unwrap();
        assert_eq!(route.origin, "A");
        assert_eq!(route.link(0).base_duration, 30.0);
        assert_eq!(route.link(0).points[1].dist_from_prev, 100.0);
        assert_eq!(route.drivers[3].as_str(), "d4");
        assert_eq!(route.scheduled_duration_secs(), 30.0);
        assert_eq!(route.length_m(), 100.0);
    }

    #[test]
    fn drivers_default_to_empty() {
        let json = r#"{ "links": [ { "length": 0.0, "baseDuration": 5.0,
                        "points": [ { "lat": 0.0, "lng": 0.0, "distFromPrev": 0.0 } ] } ] }"#;
        let route = load_route_reader(json.as_bytes()).unwrap();
        assert!(route.drivers.is_empty());
    }

    #[test]
    fn malformed_json_is_json_error() {
        let result = load_route_reader("{ not json".as_bytes());
        assert!(matches!(result, Err(RouteError::Json(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ROUTE_JSON.as_bytes()).unwrap();
        let route = load_route_json(file.path()).unwrap();
        assert_eq!(route.link_count(), 1);
    }
}
