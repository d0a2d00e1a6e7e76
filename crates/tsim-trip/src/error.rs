use thiserror::Error;

use tsim_route::RouteError;

use crate::ReportError;

#[derive(Debug, Error)]
pub enum TripError {
    #[error("invalid trip configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Route(#[from] RouteError),

    /// The reporter failed under [`ReportFailurePolicy::Abort`][crate::ReportFailurePolicy].
    #[error("location report at t={time} ms failed")]
    Report {
        time: i64,
        #[source]
        source: ReportError,
    },
}

pub type TripResult<T> = Result<T, TripError>;
