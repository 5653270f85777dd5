// HTTP request handlers
use crate::domain::aqi::AqiResult;
use crate::domain::dashboard::{Dashboard, DatasetInfo, PredictionView};
use crate::domain::errors::DashboardError;
use crate::domain::reading::Parameter;
use crate::infrastructure::http_response::csv_download_response;
use crate::presentation::app_state::AppState;
use crate::presentation::dto::{AqiQuery, DashboardQuery, PredictionQuery, RangeQuery, parse_parameter};
use crate::presentation::error::AppError;
use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use std::sync::Arc;

pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Whether the client advertises Brotli support
fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get("accept-encoding")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.contains("br"))
        .unwrap_or(false)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Parameter options and data bounds for the page controls
pub async fn dataset_info(State(state): State<Arc<AppState>>) -> Json<DatasetInfo> {
    Json(state.dashboard_service.dataset_info())
}

/// Every widget of the analysis page for one selection
pub async fn get_dashboard(
    Query(query): Query<DashboardQuery>,
    State(state): State<Arc<AppState>>,
) -> HandlerResult<Dashboard> {
    let defaults = state
        .dashboard_service
        .default_selection()
        .ok_or(DashboardError::EmptyRange)?;
    let selection = query.into_selection(defaults)?;

    Ok(Json(state.dashboard_service.get_dashboard(&selection)))
}

/// Historical window plus naive projection for one parameter
pub async fn get_prediction(
    Query(query): Query<PredictionQuery>,
    State(state): State<Arc<AppState>>,
) -> HandlerResult<PredictionView> {
    let parameter = parse_parameter(&query.parameter, Parameter::Pm25)?;
    Ok(Json(state.dashboard_service.get_prediction(parameter)?))
}

/// AQI for an arbitrary PM2.5 concentration
pub async fn lookup_aqi(
    Query(query): Query<AqiQuery>,
    State(state): State<Arc<AppState>>,
) -> HandlerResult<AqiResult> {
    if !query.pm25.is_finite() {
        return Err(AppError::BadRequest("pm25 must be a finite number".to_string()));
    }
    Ok(Json(state.dashboard_service.lookup_aqi(query.pm25)))
}

/// Download the readings of a range as CSV
pub async fn export_csv(
    Query(query): Query<RangeQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let (first, last) = state
        .dashboard_service
        .bounds()
        .unwrap_or((NaiveDateTime::MIN, NaiveDateTime::MAX));
    let (start, end) = query.resolve(first, last)?;

    let csv_bytes = state.dashboard_service.export_csv(start, end)?;
    match csv_download_response(csv_bytes, accepts_brotli(&headers)).await {
        Ok(response) => Ok(response),
        Err(status) => Ok(status.into_response()),
    }
}
