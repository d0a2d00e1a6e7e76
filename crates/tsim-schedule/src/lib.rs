//! `tsim-schedule`: calendar ids, departure slots, and trip plans.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`calendar`] | `DayId`, `MonthId`, `Period`, `Half`                       |
//! | [`slot`]     | `ScheduledStart`, `driver_for`, `departures`               |
//! | [`plan`]     | `TripPlan`, `day_plans`, `sample_dates`                    |
//! | [`error`]    | `ScheduleError`, `ScheduleResult<T>`                       |
//!
//! # Service day
//!
//! ```text
//! departures      = 06:00, 06:15, … 20:45             (60 trips)
//! scheduled start = wall time rounded to the nearest quarter hour
//! driver          = route.drivers[minute / 15]
//! ```
//!
//! Month and period runs do not simulate every day: [`sample_dates`] picks
//! every 15th day that lies strictly before today.

pub mod calendar;
pub mod error;
pub mod plan;
pub mod slot;


pub use calendar::{DayId, Half, MonthId, Period};
pub use error::{ScheduleError, ScheduleResult};
pub use plan::{SAMPLE_STEP_DAYS, TripPlan, day_plans, sample_dates};
pub use slot::{
    FIRST_DEPARTURE_HOUR, LAST_DEPARTURE_HOUR, SLOT_MINUTES, ScheduledStart, departures,
    driver_for,
};
