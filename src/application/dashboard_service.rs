// Dashboard service - Use cases behind the analysis and prediction pages
use crate::application::forecast::ProjectionModel;
use crate::application::pipeline;
use crate::domain::alert::{AlertThresholds, AlertsView};
use crate::domain::aqi::{AqiResult, OutOfRangePolicy};
use crate::domain::dashboard::{Dashboard, DatasetInfo, PredictionView, Widget};
use crate::domain::errors::DashboardError;
use crate::domain::reading::Parameter;
use crate::domain::selection::Selection;
use crate::domain::series::SeriesStore;
use crate::infrastructure::csv_codec;
use chrono::NaiveDateTime;
use std::sync::Arc;

/// Knobs of the derived views that come from configuration
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub aqi_policy: OutOfRangePolicy,
    pub thresholds: AlertThresholds,
    pub horizon_hours: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            aqi_policy: OutOfRangePolicy::default(),
            thresholds: AlertThresholds::default(),
            horizon_hours: 24,
        }
    }
}

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<SeriesStore>,
    settings: PipelineSettings,
    projection: Arc<dyn ProjectionModel>,
}

impl DashboardService {
    pub fn new(
        store: Arc<SeriesStore>,
        settings: PipelineSettings,
        projection: Arc<dyn ProjectionModel>,
    ) -> Self {
        Self {
            store,
            settings,
            projection,
        }
    }

    pub fn bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.store.bounds()
    }

    pub fn dataset_info(&self) -> DatasetInfo {
        let bounds = self.store.bounds();
        DatasetInfo {
            parameters: Parameter::ALL.to_vec(),
            alert_parameters: self.settings.thresholds.parameters().collect(),
            start: bounds.map(|(start, _)| start),
            end: bounds.map(|(_, end)| end),
            readings: self.store.len(),
        }
    }

    /// Page state before the user touches anything: whole data range.
    /// `None` when the store holds no readings.
    pub fn default_selection(&self) -> Option<Selection> {
        self.store
            .bounds()
            .map(|(start, end)| Selection::with_range(start, end))
    }

    pub fn get_dashboard(&self, selection: &Selection) -> Dashboard {
        let series = self.store.filter_range(selection.start, selection.end);

        tracing::debug!(
            "Building dashboard for {} from {} to {}: {} readings",
            selection.parameter,
            selection.start,
            selection.end,
            series.len()
        );

        let aqi = if selection.parameter == Parameter::Pm25 {
            Widget::from(pipeline::current_aqi(series, self.settings.aqi_policy))
        } else {
            Widget::unavailable("Select PM2.5 for AQI")
        };
        let weather = Widget::from(pipeline::current_weather(series));

        if !weather.is_ready() {
            tracing::warn!(
                "No readings between {} and {}, current values unavailable",
                selection.start,
                selection.end
            );
        }

        let events = pipeline::evaluate_alerts(series, &selection.alerts, &self.settings.thresholds);
        if !events.is_empty() {
            tracing::info!("{} threshold alert(s) in selected range", events.len());
        }

        Dashboard {
            title: "Air Quality Dashboard".to_string(),
            start: selection.start,
            end: selection.end,
            readings: series.len(),
            aqi,
            weather,
            chart: pipeline::chart_series(series, selection.parameter, selection.chart_kind),
            comparison: pipeline::comparison_series(series, selection.compare_a, selection.compare_b),
            alerts: AlertsView::from_events(&selection.alerts, events),
        }
    }

    /// The prediction page looks at the whole store, not the selected range
    pub fn get_prediction(&self, parameter: Parameter) -> Result<PredictionView, DashboardError> {
        let series = self.store.readings();
        let projection = pipeline::project_forward(
            series,
            parameter,
            self.settings.horizon_hours,
            self.projection.as_ref(),
        )?;

        tracing::debug!(
            "Projected {} {} hours ahead from {} historical points",
            parameter,
            projection.projected.len(),
            projection.historical.len()
        );

        Ok(PredictionView {
            title: format!("{} - Historical and Predicted Values", parameter),
            parameter,
            projection,
            statistics: Widget::from(pipeline::summary_statistics(series, parameter)),
        })
    }

    pub fn lookup_aqi(&self, pm25: f64) -> AqiResult {
        AqiResult::from_pm25(pm25, self.settings.aqi_policy)
    }

    /// CSV of the readings inside `[start, end]`
    pub fn export_csv(&self, start: NaiveDateTime, end: NaiveDateTime) -> anyhow::Result<Vec<u8>> {
        let series = self.store.filter_range(start, end);
        tracing::info!("Exporting {} readings from {} to {}", series.len(), start, end);
        csv_codec::export_csv(series)
    }
}
