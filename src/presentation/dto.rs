// Query payloads and their conversion into typed selections
use super::error::AppError;
use crate::domain::reading::{Parameter, parse_timestamp};
use crate::domain::selection::Selection;
use crate::domain::telemetry::ChartKind;
use chrono::NaiveDateTime;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub parameter: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub chart: Option<String>,
    pub compare_a: Option<String>,
    pub compare_b: Option<String>,
    /// Comma separated, e.g. `PM25,O3`
    pub alerts: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PredictionQuery {
    pub parameter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AqiQuery {
    pub pm25: f64,
}

/// Blank query values count as absent
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn parse_parameter(value: &Option<String>, default: Parameter) -> Result<Parameter, AppError> {
    match present(value) {
        Some(raw) => Ok(raw.parse::<Parameter>()?),
        None => Ok(default),
    }
}

fn parse_time(field: &str, value: &Option<String>, default: NaiveDateTime) -> Result<NaiveDateTime, AppError> {
    match present(value) {
        Some(raw) => parse_timestamp(raw)
            .ok_or_else(|| AppError::BadRequest(format!("invalid {} timestamp '{}'", field, raw))),
        None => Ok(default),
    }
}

impl RangeQuery {
    pub fn resolve(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<(NaiveDateTime, NaiveDateTime), AppError> {
        Ok((
            parse_time("start", &self.start, start)?,
            parse_time("end", &self.end, end)?,
        ))
    }
}

impl DashboardQuery {
    /// Apply the query on top of `defaults`. Any unrecognised value rejects
    /// the whole selection.
    pub fn into_selection(self, defaults: Selection) -> Result<Selection, AppError> {
        let alerts = match present(&self.alerts) {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::parse::<Parameter>)
                .collect::<Result<Vec<_>, _>>()?,
            None => defaults.alerts.clone(),
        };

        let chart_kind = match present(&self.chart) {
            Some(raw) => raw.parse::<ChartKind>()?,
            None => defaults.chart_kind,
        };

        let selection = Selection {
            parameter: parse_parameter(&self.parameter, defaults.parameter)?,
            start: parse_time("start", &self.start, defaults.start)?,
            end: parse_time("end", &self.end, defaults.end)?,
            chart_kind,
            compare_a: parse_parameter(&self.compare_a, defaults.compare_a)?,
            compare_b: parse_parameter(&self.compare_b, defaults.compare_b)?,
            alerts: Vec::new(),
        };

        Ok(selection.with_alerts(alerts))
    }
}
