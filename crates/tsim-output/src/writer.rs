//! The `OutputWriter` trait implemented by output backends.

use crate::{LocationRow, OutputResult, TripSummaryRow};

/// Destination for the rows of an offline run.
pub trait OutputWriter {
    /// Write a batch of location reports.
    fn write_locations(&mut self, rows: &[LocationRow]) -> OutputResult<()>;

    /// Write the summary of one finished trip.
    fn write_trip_summary(&mut self, row: &TripSummaryRow) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Calling it again is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
