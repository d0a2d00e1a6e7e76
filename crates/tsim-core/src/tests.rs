//! Unit tests for tsim-core primitives.

#[cfg(test)]
mod ids {
    use crate::{RouteId, TripId};

    #[test]
    fn display_is_bare_string() {
        assert_eq!(RouteId::from("T100").to_string(), "T100");
        assert_eq!(TripId::new("abc-1").as_str(), "abc-1");
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&TripId::from("t-42")).unwrap();
        assert_eq!(json, "\"t-42\"");
        let back: TripId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TripId::from("t-42"));
    }
}

#[cfg(test)]
mod geo {
    use crate::LatLng;

    #[test]
    fn zero_distance() {
        let p = LatLng::new(1.3521, 103.8198);
        assert!(p.distance_m(p) < 0.001);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = LatLng::new(1.0, 103.0);
        let b = LatLng::new(2.0, 103.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 50.0, "got {d}");
    }

    #[test]
    fn finite_check() {
        assert!(LatLng::new(0.0, 0.0).is_finite());
        assert!(!LatLng::new(f64::NAN, 0.0).is_finite());
        assert!(!LatLng::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn wire_field_names() {
        let json = serde_json::to_value(LatLng::new(1.5, 2.5)).unwrap();
        assert_eq!(json, serde_json::json!({ "lat": 1.5, "lng": 2.5 }));
    }
}

#[cfg(test)]
mod time {
    use crate::TripClock;

    #[test]
    fn starts_at_start() {
        let clock = TripClock::new(1_000);
        assert_eq!(clock.now_ms(), 1_000);
        assert_eq!(clock.elapsed_secs(), 0.0);
    }

    #[test]
    fn advance_accumulates_fractional_seconds() {
        let mut clock = TripClock::new(0);
        for _ in 0..1_000 {
            clock.advance(0.0015);
        }
        // 1000 × 1.5 ms = 1.5 s; no per-step millisecond truncation.
        assert_eq!(clock.now_ms(), 1_500);
        assert!((clock.elapsed_secs() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn zero_step_is_allowed() {
        let mut clock = TripClock::new(5);
        clock.advance(0.0);
        assert_eq!(clock.now_ms(), 5);
    }

    #[test]
    #[should_panic(expected = "only move forward")]
    fn negative_step_panics() {
        TripClock::new(0).advance(-1.0);
    }

    #[test]
    fn display_hms() {
        let mut clock = TripClock::new(0);
        clock.advance(3_725.4);
        assert_eq!(clock.to_string(), "t+01:02:05");
    }
}

#[cfg(test)]
mod rng {
    use rand::Rng;

    use crate::{SimRng, TripRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = TripRng::seeded(12345);
        let mut r2 = TripRng::seeded(12345);
        for _ in 0..100 {
            let a: f64 = r1.inner().r#gen();
            let b: f64 = r2.inner().r#gen();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut r1 = TripRng::seeded(1);
        let mut r2 = TripRng::seeded(2);
        let a: Vec<u64> = (0..4).map(|_| r1.inner().r#gen()).collect();
        let b: Vec<u64> = (0..4).map(|_| r2.inner().r#gen()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn child_seeds_are_reproducible() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        let seeds_a: Vec<u64> = (0..5).map(|_| a.child_seed()).collect();
        let seeds_b: Vec<u64> = (0..5).map(|_| b.child_seed()).collect();
        assert_eq!(seeds_a, seeds_b);
        assert_ne!(seeds_a[0], seeds_a[1], "consecutive child seeds should differ");
    }
}
