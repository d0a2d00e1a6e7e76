//! Async client for the trip service.

use std::time::Duration;

use reqwest::{Client, Method, Response, Url};
use serde::Deserialize;
use tracing::debug;

use tsim_core::{RouteId, TripId};
use tsim_route::{Route, RouteData};
use tsim_schedule::{MonthId, Period, TripPlan};
use tsim_trip::LocationReport;

use crate::{ApiError, ApiResult};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ── ApiConfig ─────────────────────────────────────────────────────────────────

/// Where the trip service lives and how long to wait for it.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub base_url: Url,
    /// Per-request timeout covering connect, send, and response body.
    pub request_timeout: Duration,
}

impl ApiConfig {
    /// Parse `base_url` (e.g. `http://localhost:3000/api`).  Only `http` and
    /// `https` URLs that can carry a path are accepted.
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let invalid = || ApiError::InvalidBaseUrl(base_url.to_owned());
        let url = Url::parse(base_url).map_err(|_| invalid())?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(invalid());
        }
        Ok(Self { base_url: url, request_timeout: DEFAULT_REQUEST_TIMEOUT })
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

// ── Query scopes ──────────────────────────────────────────────────────────────

/// Which generated trips `DELETE /trip` removes.
#[derive(Clone, Debug, PartialEq)]
pub enum TripFilter {
    Trip(TripId),
    Month(MonthId),
    Period(Period),
}

impl TripFilter {
    fn query(&self) -> (&'static str, String) {
        match self {
            TripFilter::Trip(id) => ("trip", id.to_string()),
            TripFilter::Month(m) => ("month", m.to_string()),
            TripFilter::Period(p) => ("period", p.to_string()),
        }
    }
}

/// What `POST /analytics` aggregates over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnalyticsScope {
    Month(MonthId),
    Period(Period),
}

impl AnalyticsScope {
    fn query(&self) -> (&'static str, String) {
        match self {
            AnalyticsScope::Month(m) => ("month", m.to_string()),
            AnalyticsScope::Period(p) => ("period", p.to_string()),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartTripResponse {
    trip_id: TripId,
}

// ── ApiClient ─────────────────────────────────────────────────────────────────

/// Thin async client for the trip service.  Cheap to clone; clones share one
/// connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self::from_parts(client, config.base_url))
    }

    pub(crate) fn from_parts(client: Client, base: Url) -> Self {
        Self { client, base }
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `GET /routes/{routeId}`, validated into a [`Route`].
    pub async fn route(&self, route_id: &RouteId) -> ApiResult<Route> {
        let url = self.route_url(route_id)?;
        let data: RouteData = self.send(Method::GET, url).await?.json().await?;
        Ok(Route::new(data)?)
    }

    /// `POST /cleanup`: drop leftovers of interrupted trips.
    pub async fn cleanup(&self) -> ApiResult<()> {
        let url = self.endpoint(&["cleanup"])?;
        self.send(Method::POST, url).await?;
        Ok(())
    }

    /// `POST /trip?route=&day=&start=&driver=`: register a trip and return
    /// the id to report its locations under.
    pub async fn start_trip(&self, plan: &TripPlan) -> ApiResult<TripId> {
        let url = self.start_trip_url(plan)?;
        let body: StartTripResponse = self.send(Method::POST, url).await?.json().await?;
        Ok(body.trip_id)
    }

    /// `POST /location/{tripId}` with the report as JSON.
    pub async fn post_location(&self, trip_id: &TripId, report: &LocationReport) -> ApiResult<()> {
        let url = self.location_url(trip_id)?;
        let response = self.client.post(url.clone()).json(report).send().await?;
        check_status(response, url)?;
        Ok(())
    }

    /// `DELETE /trip?trip=|month=|period=`.
    pub async fn delete_trips(&self, filter: &TripFilter) -> ApiResult<()> {
        let url = self.delete_trips_url(filter)?;
        self.send(Method::DELETE, url).await?;
        Ok(())
    }

    /// `POST /analytics?month=|period=`; the result is passed through as-is.
    pub async fn analytics(&self, scope: AnalyticsScope) -> ApiResult<serde_json::Value> {
        let url = self.analytics_url(scope)?;
        Ok(self.send(Method::POST, url).await?.json().await?)
    }

    // ── URLs ──────────────────────────────────────────────────────────────

    pub(crate) fn route_url(&self, route_id: &RouteId) -> ApiResult<Url> {
        self.endpoint(&["routes", route_id.as_str()])
    }

    pub(crate) fn location_url(&self, trip_id: &TripId) -> ApiResult<Url> {
        self.endpoint(&["location", trip_id.as_str()])
    }

    pub(crate) fn start_trip_url(&self, plan: &TripPlan) -> ApiResult<Url> {
        let mut url = self.endpoint(&["trip"])?;
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("route", plan.route_id.as_str())
                .append_pair("day", &plan.day.to_string())
                .append_pair("start", &plan.start.to_string());
            if let Some(driver) = &plan.driver {
                q.append_pair("driver", driver.as_str());
            }
        }
        Ok(url)
    }

    pub(crate) fn delete_trips_url(&self, filter: &TripFilter) -> ApiResult<Url> {
        let (key, value) = filter.query();
        let mut url = self.endpoint(&["trip"])?;
        url.query_pairs_mut().append_pair(key, &value);
        Ok(url)
    }

    pub(crate) fn analytics_url(&self, scope: AnalyticsScope) -> ApiResult<Url> {
        let (key, value) = scope.query();
        let mut url = self.endpoint(&["analytics"])?;
        url.query_pairs_mut().append_pair(key, &value);
        Ok(url)
    }

    /// `base` with `segments` appended as percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, method: Method, url: Url) -> ApiResult<Response> {
        debug!(%method, %url, "request");
        let response = self.client.request(method, url.clone()).send().await?;
        check_status(response, url)
    }
}

fn check_status(response: Response, url: Url) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status { status, url })
    }
}
