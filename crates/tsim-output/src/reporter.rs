//! Location reporting into an [`OutputWriter`] shared by concurrent trips.

use std::sync::{Arc, Mutex};

use tsim_core::TripId;
use tsim_trip::{LocationReport, LocationReporter, ReportError};

use crate::{CsvWriter, LocationRow, OutputError, OutputResult, OutputWriter};

/// One writer, many trips.  The lock is only held for the duration of a
/// single write and never across an `.await`.
pub type SharedWriter<W> = Arc<Mutex<W>>;

pub fn shared<W: OutputWriter>(writer: W) -> SharedWriter<W> {
    Arc::new(Mutex::new(writer))
}

/// Lock `writer` and run `f` on it.
pub fn with_writer<W, T>(
    writer: &SharedWriter<W>,
    f: impl FnOnce(&mut W) -> OutputResult<T>,
) -> OutputResult<T> {
    let mut guard = writer.lock().map_err(|_| OutputError::Poisoned)?;
    f(&mut guard)
}

/// A [`LocationReporter`] that appends every report of one trip to a shared
/// writer, tagged with the trip's id.
pub struct OutputReporter<W> {
    writer: SharedWriter<W>,
    trip_id: TripId,
}

/// The reporter used by offline runs.
pub type CsvReporter = OutputReporter<CsvWriter>;

impl<W> OutputReporter<W> {
    pub fn new(writer: SharedWriter<W>, trip_id: TripId) -> Self {
        Self { writer, trip_id }
    }

    pub fn trip_id(&self) -> &TripId {
        &self.trip_id
    }
}

impl<W: OutputWriter + Send> LocationReporter for OutputReporter<W> {
    async fn report(&mut self, report: LocationReport) -> Result<(), ReportError> {
        let row = LocationRow::new(&self.trip_id, &report);
        with_writer(&self.writer, |w| w.write_locations(std::slice::from_ref(&row)))
            .map_err(|e| ReportError::Transport(e.to_string()))
    }
}
