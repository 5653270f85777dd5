// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dataset_info, export_csv, get_dashboard, get_prediction, health_check, lookup_aqi,
};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/parameters", get(dataset_info))
        .route("/dashboard", get(get_dashboard))
        .route("/prediction", get(get_prediction))
        .route("/aqi", get(lookup_aqi))
        .route("/export", get(export_csv))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
