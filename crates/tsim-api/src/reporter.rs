use chrono::DateTime;
use tracing::info;

use tsim_core::TripId;
use tsim_trip::{LocationReport, LocationReporter, ReportError};

use crate::ApiClient;

/// Posts each report to `POST /location/{tripId}`.
///
/// With `echo` on, every report is also logged at `info` level, which is
/// how real-time runs show progress.
#[derive(Clone, Debug)]
pub struct HttpReporter {
    client: ApiClient,
    trip_id: TripId,
    echo: bool,
}

impl HttpReporter {
    pub fn new(client: ApiClient, trip_id: TripId) -> Self {
        Self { client, trip_id, echo: false }
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn trip_id(&self) -> &TripId {
        &self.trip_id
    }
}

impl LocationReporter for HttpReporter {
    async fn report(&mut self, report: LocationReport) -> Result<(), ReportError> {
        if self.echo {
            match DateTime::from_timestamp_millis(report.time) {
                Some(at) => info!(
                    trip = %self.trip_id,
                    at = %at.to_rfc3339(),
                    location = %report.location,
                    "location"
                ),
                None => info!(
                    trip = %self.trip_id,
                    time = report.time,
                    location = %report.location,
                    "location"
                ),
            }
        }
        self.client.post_location(&self.trip_id, &report).await?;
        Ok(())
    }
}
