//! Quarter-hour departure slots and the driver roster.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use tsim_core::DriverId;

use crate::{ScheduleError, ScheduleResult};

/// Minutes between consecutive departures.
pub const SLOT_MINUTES: u32 = 15;
/// First departure of the service day (inclusive).
pub const FIRST_DEPARTURE_HOUR: u32 = 6;
/// End of the service day (exclusive): no departure at or after this hour.
pub const LAST_DEPARTURE_HOUR: u32 = 21;

// ── ScheduledStart ────────────────────────────────────────────────────────────

/// The published start time of a trip, `HH:MM` on a quarter hour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ScheduledStart {
    hour: u32,
    minute: u32,
}

impl ScheduledStart {
    /// `None` unless `hour < 24` and `minute` is 0, 15, 30 or 45.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60 && minute % SLOT_MINUTES == 0)
            .then_some(ScheduledStart { hour, minute })
    }

    /// Round `time` to the nearest quarter hour.  `:53` and later round up
    /// into the next hour; `23:53` and later wrap to `00:00`.
    pub fn nearest(time: NaiveTime) -> Self {
        let quarters = (time.minute() as f64 / SLOT_MINUTES as f64).round() as u32;
        let mut minute = quarters * SLOT_MINUTES;
        let mut hour = time.hour();
        if minute == 60 {
            hour = (hour + 1) % 24;
            minute = 0;
        }
        ScheduledStart { hour, minute }
    }

    pub fn hour(self) -> u32 {
        self.hour
    }

    pub fn minute(self) -> u32 {
        self.minute
    }

    /// Index of this start within its hour: `minute / 15`, so 0–3.
    #[inline]
    pub fn slot(self) -> usize {
        (self.minute / SLOT_MINUTES) as usize
    }
}

impl FromStr for ScheduledStart {
    type Err = ScheduleError;

    fn from_str(s: &str) -> ScheduleResult<Self> {
        let err = || ScheduleError::parse("scheduled start", s);
        let (h, m) = s.split_once(':').ok_or_else(err)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(err());
        }
        let hour = h.parse().map_err(|_| err())?;
        let minute = m.parse().map_err(|_| err())?;
        ScheduledStart::new(hour, minute).ok_or_else(err)
    }
}

impl TryFrom<String> for ScheduledStart {
    type Error = ScheduleError;

    fn try_from(s: String) -> ScheduleResult<Self> {
        s.parse()
    }
}

impl From<ScheduledStart> for String {
    fn from(start: ScheduledStart) -> String {
        start.to_string()
    }
}

impl fmt::Display for ScheduledStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

// ── Drivers and departures ────────────────────────────────────────────────────

/// The driver rostered for `start`: `drivers[start.slot()]`.
///
/// Routes publish one driver per quarter of the hour.  Returns `None` when
/// the roster is shorter than the slot index.
pub fn driver_for(drivers: &[DriverId], start: ScheduledStart) -> Option<&DriverId> {
    drivers.get(start.slot())
}

/// Every departure of the service day on `date`, as local wall times:
/// 06:00, 06:15, … 20:45.
pub fn departures(date: NaiveDate) -> Vec<NaiveDateTime> {
    let step = TimeDelta::minutes(SLOT_MINUTES as i64);
    let mut out = Vec::new();
    let Some(mut t) = date.and_hms_opt(FIRST_DEPARTURE_HOUR, 0, 0) else {
        return out;
    };
    while t.date() == date && t.hour() < LAST_DEPARTURE_HOUR {
        out.push(t);
        t += step;
    }
    out
}
