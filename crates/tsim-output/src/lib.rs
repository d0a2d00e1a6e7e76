//! `tsim-output`: files written by offline runs.
//!
//! Runs started with an output directory skip the trip service entirely and
//! write two CSV files instead:
//!
//! | File                 | One row per                                        |
//! |----------------------|----------------------------------------------------|
//! | `locations.csv`      | location report (`trip_id, time_ms, lat, lng`)     |
//! | `trip_summaries.csv` | finished trip (plan, outcome, counters, timings)   |
//!
//! Concurrent trips share one [`CsvWriter`] through a [`SharedWriter`]; each
//! trip reports through its own [`CsvReporter`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use tsim_output::{CsvReporter, CsvWriter, shared};
//!
//! let writer = shared(CsvWriter::new(Path::new("./output"))?);
//! let reporter = CsvReporter::new(writer.clone(), trip_id.clone());
//! let summary = TripSimulator::new(route, reporter, config)?.run().await?;
//! let row = TripSummaryRow::new(&trip_id, &plan, &summary);
//! with_writer(&writer, |w| w.write_trip_summary(&row))?;
//! with_writer(&writer, |w| w.finish())?;
//! ```

pub mod csv;
pub mod error;
pub mod reporter;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::{CsvWriter, LOCATIONS_FILE, TRIP_SUMMARIES_FILE};
pub use error::{OutputError, OutputResult};
pub use reporter::{CsvReporter, OutputReporter, SharedWriter, shared, with_writer};
pub use row::{LocationRow, TripSummaryRow};
pub use writer::OutputWriter;
