use reqwest::{StatusCode, Url};
use thiserror::Error;

use tsim_route::RouteError;
use tsim_trip::ReportError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{url} answered {status}")]
    Status { status: StatusCode, url: Url },

    #[error("route from service is unusable: {0}")]
    Route(#[from] RouteError),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// A failed `POST /location` seen from the simulator: refused by the
/// service, or never delivered.
impl From<ApiError> for ReportError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { .. } => ReportError::Rejected(err.to_string()),
            other => ReportError::Transport(other.to_string()),
        }
    }
}
