use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    /// `input` is not a valid `kind` id (e.g. a month id that is not `YYYYMM`).
    #[error("invalid {kind} '{input}'")]
    Parse { kind: &'static str, input: String },

    /// The local wall time does not exist in the target time zone
    /// (daylight-saving gap).
    #[error("local time {0} does not exist in this time zone")]
    NonexistentLocalTime(NaiveDateTime),
}

impl ScheduleError {
    pub(crate) fn parse(kind: &'static str, input: impl Into<String>) -> Self {
        ScheduleError::Parse { kind, input: input.into() }
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
