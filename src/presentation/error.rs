// HTTP error mapping
use crate::domain::errors::DashboardError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON error body
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Dashboard(DashboardError),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::Dashboard(e) => match e {
                DashboardError::UnknownParameter(_) | DashboardError::UnknownChartKind(_) => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", e.to_string())
                }
                DashboardError::EmptyRange => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "EMPTY_RANGE", e.to_string())
                }
                DashboardError::InsufficientReadings { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "INSUFFICIENT_READINGS", e.to_string())
                }
                DashboardError::InvalidSeries { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INVALID_SERIES", e.to_string())
                }
            },
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg)
            }
        };

        (status, Json(ApiError { code, message })).into_response()
    }
}

impl From<DashboardError> for AppError {
    fn from(e: DashboardError) -> Self {
        AppError::Dashboard(e)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(format!("{:#}", e))
    }
}
