//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `locations.csv`
//! - `trip_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use tsim_trip::TripOutcome;

use crate::writer::OutputWriter;
use crate::{LocationRow, OutputResult, TripSummaryRow};

pub const LOCATIONS_FILE: &str = "locations.csv";
pub const TRIP_SUMMARIES_FILE: &str = "trip_summaries.csv";

/// Writes run output to two CSV files.
pub struct CsvWriter {
    locations: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (truncating) the two CSV files, and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut locations = Writer::from_path(dir.join(LOCATIONS_FILE))?;
        locations.write_record(["trip_id", "time_ms", "lat", "lng"])?;

        let mut summaries = Writer::from_path(dir.join(TRIP_SUMMARIES_FILE))?;
        summaries.write_record([
            "trip_id",
            "route_id",
            "day",
            "start",
            "driver",
            "outcome",
            "steps",
            "reports_sent",
            "reports_failed",
            "stops",
            "travel_secs",
            "dwell_secs",
            "elapsed_secs",
            "start_ms",
            "end_ms",
        ])?;

        Ok(Self {
            locations,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_locations(&mut self, rows: &[LocationRow]) -> OutputResult<()> {
        for row in rows {
            self.locations.write_record(&[
                row.trip_id.to_string(),
                row.time_ms.to_string(),
                row.lat.to_string(),
                row.lng.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_trip_summary(&mut self, row: &TripSummaryRow) -> OutputResult<()> {
        let outcome = match row.outcome {
            TripOutcome::Completed => "completed",
            TripOutcome::Cancelled => "cancelled",
        };
        self.summaries.write_record(&[
            row.trip_id.to_string(),
            row.route_id.clone(),
            row.day.to_string(),
            row.start.clone(),
            row.driver.clone(),
            outcome.to_owned(),
            row.steps.to_string(),
            row.reports_sent.to_string(),
            row.reports_failed.to_string(),
            row.stops.to_string(),
            format!("{:.3}", row.travel_secs),
            format!("{:.3}", row.dwell_secs),
            format!("{:.3}", row.elapsed_secs),
            row.start_ms.to_string(),
            row.end_ms.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.locations.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
