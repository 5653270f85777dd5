// Telemetry view models - chart series, snapshots and statistics
use super::errors::DashboardError;
use super::reading::Parameter;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(timestamp: NaiveDateTime, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Rendering hint only, the data is the same for every kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Scatter,
}

impl FromStr for ChartKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "line" => Ok(ChartKind::Line),
            "bar" => Ok(ChartKind::Bar),
            "scatter" => Ok(ChartKind::Scatter),
            other => Err(DashboardError::UnknownChartKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub parameter: Parameter,
    pub kind: ChartKind,
    pub points: Vec<TimeSeriesPoint>,
}

impl ChartData {
    pub fn new(parameter: Parameter, kind: ChartKind, points: Vec<TimeSeriesPoint>) -> Self {
        Self {
            title: format!("{} Over Time", parameter),
            parameter,
            kind,
            points,
        }
    }
}

/// Two columns paired row by row for a scatter comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSeries {
    pub title: String,
    pub x_parameter: Parameter,
    pub y_parameter: Parameter,
    pub points: Vec<(f64, f64)>,
}

impl ComparisonSeries {
    pub fn new(x_parameter: Parameter, y_parameter: Parameter, points: Vec<(f64, f64)>) -> Self {
        Self {
            title: format!("Correlation between {} and {}", x_parameter, y_parameter),
            x_parameter,
            y_parameter,
            points,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub last: f64,
    pub mean: f64,
    /// Sample standard deviation (divisor n - 1)
    pub std_dev: f64,
}

/// Recent history followed by the naive extrapolation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub parameter: Parameter,
    pub historical: Vec<TimeSeriesPoint>,
    pub projected: Vec<TimeSeriesPoint>,
}
