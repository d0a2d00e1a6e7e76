//! Unit and integration tests for tsim-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use tsim_core::{DriverId, RouteId, TripId};
    use tsim_schedule::{DayId, TripPlan};
    use tsim_trip::{TripOutcome, TripSummary};

    use crate::csv::CsvWriter;
    use crate::row::{LocationRow, TripSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn location_row(trip: &str, time_ms: i64) -> LocationRow {
        LocationRow { trip_id: TripId::from(trip), time_ms, lat: 1.25, lng: 103.5 }
    }

    fn summary_row(driver: Option<&str>) -> TripSummaryRow {
        let plan = TripPlan {
            route_id: RouteId::from("R"),
            day:      DayId::try_from(20_240_315).unwrap(),
            start:    "06:15".parse().unwrap(),
            driver:   driver.map(DriverId::from),
            start_ms: 1_000,
        };
        let summary = TripSummary {
            outcome:        TripOutcome::Completed,
            steps:          6,
            reports_sent:   4,
            reports_failed: 0,
            stops:          1,
            travel_secs:    120.5,
            dwell_secs:     23.0,
            elapsed_secs:   143.5,
            start_ms:       1_000,
            end_ms:         144_500,
        };
        TripSummaryRow::new(&TripId::from("t1"), &plan, &summary)
    }

    fn read_all(path: std::path::PathBuf) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("locations.csv").exists());
        assert!(dir.path().join("trip_summaries.csv").exists());
    }

    #[test]
    fn csv_creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("march");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("locations.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let (headers, rows) = read_all(dir.path().join("locations.csv"));
        assert_eq!(headers, ["trip_id", "time_ms", "lat", "lng"]);
        assert!(rows.is_empty());

        let (headers, _) = read_all(dir.path().join("trip_summaries.csv"));
        assert_eq!(headers[..6], ["trip_id", "route_id", "day", "start", "driver", "outcome"]);
        assert_eq!(headers.len(), 15);
    }

    #[test]
    fn csv_location_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_locations(&[location_row("a", 10), location_row("b", 20)]).unwrap();
        w.finish().unwrap();

        let (_, rows) = read_all(dir.path().join("locations.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "a");
        assert_eq!(&rows[0][1], "10");
        assert_eq!(&rows[0][2], "1.25");
        assert_eq!(&rows[1][3], "103.5");
    }

    #[test]
    fn csv_trip_summary_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_trip_summary(&summary_row(Some("d2"))).unwrap();
        w.write_trip_summary(&summary_row(None)).unwrap();
        w.finish().unwrap();

        let (headers, rows) = read_all(dir.path().join("trip_summaries.csv"));
        let col = |name: &str| headers.iter().position(|h| h == name).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][col("day")], "20240315");
        assert_eq!(&rows[0][col("start")], "06:15");
        assert_eq!(&rows[0][col("driver")], "d2");
        assert_eq!(&rows[0][col("outcome")], "completed");
        assert_eq!(&rows[0][col("elapsed_secs")], "143.500");
        assert_eq!(&rows[0][col("end_ms")], "144500");
        assert_eq!(&rows[1][col("driver")], "");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // second call should not panic
    }

    #[test]
    fn csv_empty_batch_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_locations(&[]).unwrap();
    }
}

// ── Reporter ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod reporter_tests {
    use tsim_core::{LatLng, RouteId, TripId};
    use tsim_route::RouteBuilder;
    use tsim_schedule::{DayId, TripPlan};
    use tsim_trip::{LocationReport, LocationReporter, TripConfig, TripSimulator};

    use crate::{
        CsvReporter, CsvWriter, LocationRow, OutputReporter, OutputResult, OutputWriter,
        TripSummaryRow, shared, with_writer,
    };

    /// Keeps rows in memory.
    #[derive(Default)]
    struct MemoryWriter {
        locations: Vec<LocationRow>,
        summaries: Vec<TripSummaryRow>,
    }

    impl OutputWriter for MemoryWriter {
        fn write_locations(&mut self, rows: &[LocationRow]) -> OutputResult<()> {
            self.locations.extend_from_slice(rows);
            Ok(())
        }

        fn write_trip_summary(&mut self, row: &TripSummaryRow) -> OutputResult<()> {
            self.summaries.push(row.clone());
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn reports_are_tagged_with_trip_id() {
        let writer = shared(MemoryWriter::default());
        let mut a = OutputReporter::new(writer.clone(), TripId::from("a"));
        let mut b = OutputReporter::new(writer.clone(), TripId::from("b"));
        assert_eq!(a.trip_id().as_str(), "a");
        assert_eq!(b.trip_id().as_str(), "b");

        let at = |time| LocationReport { location: LatLng::new(1.0, 2.0), time };
        a.report(at(1)).await.unwrap();
        b.report(at(2)).await.unwrap();
        a.report(at(3)).await.unwrap();

        let ids: Vec<_> = with_writer(&writer, |w| {
            Ok(w.locations.iter().map(|r| (r.trip_id.to_string(), r.time_ms)).collect())
        })
        .unwrap();
        assert_eq!(ids, [("a".to_string(), 1), ("b".to_string(), 2), ("a".to_string(), 3)]);
    }

    #[tokio::test]
    async fn batch_trip_to_csv() {
        let route = RouteBuilder::new("A", "C")
            .link(
                "A",
                "B",
                &[LatLng::new(0.0, 0.0), LatLng::new(0.0, 0.001), LatLng::new(0.0, 0.002)],
                30.0,
            )
            .link("B", "C", &[LatLng::new(0.0, 0.002), LatLng::new(0.0, 0.003)], 15.0)
            .build()
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let writer = shared(CsvWriter::new(dir.path()).unwrap());
        let trip_id = TripId::from("offline-1");
        let plan = TripPlan {
            route_id: RouteId::from("R"),
            day:      DayId::try_from(20_240_101).unwrap(),
            start:    "06:00".parse().unwrap(),
            driver:   None,
            start_ms: 1_704_088_800_000,
        };
        let config = TripConfig { seed: Some(1), ..TripConfig::batch(plan.start_ms) };

        let reporter = CsvReporter::new(writer.clone(), trip_id.clone());
        let summary = TripSimulator::new(route, reporter, config).unwrap().run().await.unwrap();
        with_writer(&writer, |w| {
            w.write_trip_summary(&TripSummaryRow::new(&trip_id, &plan, &summary))?;
            w.finish()
        })
        .unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("locations.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        // (0,0), (0,2), (1,0), (1,1): every point is a link boundary except (0,1).
        assert_eq!(rows.len(), 4);
        assert_eq!(rows.len() as u64, summary.reports_sent);
        assert!(rows.iter().all(|r| &r[0] == "offline-1"));
        assert_eq!(&rows[0][1], "1704088800000");

        let mut rdr = csv::Reader::from_path(dir.path().join("trip_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count(), 1);
    }
}
