// Dashboard domain model
use super::alert::AlertsView;
use super::aqi::AqiResult;
use super::reading::Parameter;
use super::telemetry::{ChartData, ComparisonSeries, Projection, SummaryStatistics, WeatherSnapshot};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Outcome of one card. A failed card carries a message that is rendered in
/// its place while the rest of the page still shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Widget<T> {
    Ready { data: T },
    Unavailable { message: String },
}

impl<T> Widget<T> {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Widget::Unavailable {
            message: message.into(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Widget::Ready { .. })
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Widget<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Widget::Ready { data },
            Err(e) => Widget::unavailable(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub readings: usize,
    pub aqi: Widget<AqiResult>,
    pub weather: Widget<WeatherSnapshot>,
    pub chart: ChartData,
    pub comparison: ComparisonSeries,
    pub alerts: AlertsView,
}

/// Selector options and bounds for the page controls
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInfo {
    pub parameters: Vec<Parameter>,
    pub alert_parameters: Vec<Parameter>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub readings: usize,
}

/// Prediction page: history plus naive projection, with whole-store statistics
#[derive(Debug, Clone, Serialize)]
pub struct PredictionView {
    pub title: String,
    pub parameter: Parameter,
    pub projection: Projection,
    pub statistics: Widget<SummaryStatistics>,
}
