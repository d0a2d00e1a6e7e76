//! Route-subsystem error type.

use thiserror::Error;

/// Errors produced by `tsim-route`.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid route data: {reason}")]
    InvalidRouteData { reason: String },

    #[error("route JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RouteError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        RouteError::InvalidRouteData { reason: reason.into() }
    }
}

pub type RouteResult<T> = Result<T, RouteError>;
