//! JSON API handlers.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::AppState;
use crate::catalog::SiteOption;
use crate::dashboard::{DashboardLayout, DashboardView};
use crate::error::Error;

/// Query string of `/api/charts`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ChartQuery {
    /// Selector value; absent means all sites.
    pub site: Option<String>,
    /// Lower payload bound in kilograms.
    pub min: Option<f64>,
    /// Upper payload bound in kilograms.
    pub max: Option<f64>,
}

/// Body of `/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server is up.
    pub status: String,
    /// Number of loaded records.
    pub records: usize,
    /// Number of catalog sites.
    pub sites: usize,
}

/// Body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Machine-readable code.
    pub code: String,
}

/// An error returned to an API client.
///
/// Bad selections map to `400 Bad Request`; anything else is a `500`.
#[derive(Debug)]
pub struct ApiError(Error);

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        if self.0.is_selection_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// JSON body for this error.
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.0.to_string(),
            code: self.0.code().to_string(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(Error::invalid_query(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self.0, "Request failed");
        } else {
            debug!(error = %self.0, "Rejected selection");
        }
        (status, Json(self.body())).into_response()
    }
}

pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let dashboard = state.dashboard();
    Json(HealthResponse {
        status: "ok".to_string(),
        records: dashboard.dataset().len(),
        sites: dashboard.catalog().len(),
    })
}

pub(super) async fn layout(State(state): State<AppState>) -> Json<DashboardLayout> {
    Json(state.dashboard().layout())
}

pub(super) async fn sites(State(state): State<AppState>) -> Json<Vec<SiteOption>> {
    Json(state.dashboard().catalog().options())
}

pub(super) async fn charts(
    State(state): State<AppState>,
    query: Result<Query<ChartQuery>, QueryRejection>,
) -> Result<Json<DashboardView>, ApiError> {
    let Query(query) = query?;
    let dashboard = state.dashboard();
    let selection = dashboard.selection(query.site.as_deref(), query.min, query.max)?;
    Ok(Json(dashboard.on_input_change(&selection)))
}
