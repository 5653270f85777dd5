// Derived-view pipeline - pure functions over a filtered series
use crate::application::forecast::ProjectionModel;
use crate::domain::alert::{AlertEvent, AlertThresholds};
use crate::domain::aqi::{AqiResult, OutOfRangePolicy};
use crate::domain::errors::DashboardError;
use crate::domain::reading::{Parameter, Reading};
use crate::domain::telemetry::{
    ChartData, ChartKind, ComparisonSeries, Projection, SummaryStatistics, TimeSeriesPoint,
    WeatherSnapshot,
};
use chrono::Duration;

/// Hours of history shown in front of a projection (one week)
pub const HISTORY_WINDOW_HOURS: usize = 168;

fn latest(series: &[Reading]) -> Result<&Reading, DashboardError> {
    series.last().ok_or(DashboardError::EmptyRange)
}

/// AQI of the most recent PM2.5 value
pub fn current_aqi(series: &[Reading], policy: OutOfRangePolicy) -> Result<AqiResult, DashboardError> {
    let reading = latest(series)?;
    Ok(AqiResult::from_pm25(reading.pm25, policy))
}

pub fn current_weather(series: &[Reading]) -> Result<WeatherSnapshot, DashboardError> {
    let reading = latest(series)?;
    Ok(WeatherSnapshot {
        temperature: reading.temperature,
        humidity: reading.humidity,
        wind_speed: reading.wind_speed,
    })
}

pub fn chart_series(series: &[Reading], parameter: Parameter, kind: ChartKind) -> ChartData {
    let points = series
        .iter()
        .map(|r| TimeSeriesPoint::new(r.timestamp, r.value(parameter)))
        .collect();
    ChartData::new(parameter, kind, points)
}

pub fn comparison_series(series: &[Reading], x: Parameter, y: Parameter) -> ComparisonSeries {
    let points = series.iter().map(|r| (r.value(x), r.value(y))).collect();
    ComparisonSeries::new(x, y, points)
}

/// One event per selected parameter whose maximum over the range exceeds its
/// ceiling, in selection order. Parameters without a ceiling, repeats and an
/// empty range produce nothing.
pub fn evaluate_alerts(
    series: &[Reading],
    selected: &[Parameter],
    thresholds: &AlertThresholds,
) -> Vec<AlertEvent> {
    let mut events = Vec::new();

    for (i, parameter) in selected.iter().copied().enumerate() {
        if selected[..i].contains(&parameter) {
            continue;
        }
        let Some(threshold) = thresholds.get(parameter) else {
            continue;
        };
        let observed_max = series
            .iter()
            .map(|r| r.value(parameter))
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))));

        if let Some(observed_max) = observed_max {
            if observed_max > threshold {
                events.push(AlertEvent {
                    parameter,
                    observed_max,
                    threshold,
                });
            }
        }
    }

    events
}

/// The last week of `parameter` followed by `horizon_hours` hourly values from
/// `model`, starting one hour after the last reading.
pub fn project_forward(
    series: &[Reading],
    parameter: Parameter,
    horizon_hours: usize,
    model: &dyn ProjectionModel,
) -> Result<Projection, DashboardError> {
    let last = latest(series)?;

    let window = &series[series.len().saturating_sub(HISTORY_WINDOW_HOURS)..];
    let historical = window
        .iter()
        .map(|r| TimeSeriesPoint::new(r.timestamp, r.value(parameter)))
        .collect();

    let projected = model
        .project(last.value(parameter), horizon_hours)
        .into_iter()
        .enumerate()
        .map(|(i, value)| TimeSeriesPoint::new(last.timestamp + Duration::hours(i as i64 + 1), value))
        .collect();

    Ok(Projection {
        parameter,
        historical,
        projected,
    })
}

/// Latest value, mean and sample standard deviation.
///
/// An empty series is `EmptyRange`; a single reading is `InsufficientReadings`
/// since the sample deviation is undefined for it.
pub fn summary_statistics(
    series: &[Reading],
    parameter: Parameter,
) -> Result<SummaryStatistics, DashboardError> {
    let last = latest(series)?.value(parameter);
    if series.len() < 2 {
        return Err(DashboardError::InsufficientReadings {
            needed: 2,
            found: series.len(),
        });
    }

    let n = series.len() as f64;
    let mean = series.iter().map(|r| r.value(parameter)).sum::<f64>() / n;
    let variance = series
        .iter()
        .map(|r| (r.value(parameter) - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);

    Ok(SummaryStatistics {
        last,
        mean,
        std_dev: variance.sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::forecast::{GaussianNoise, Persistence};
    use crate::domain::aqi::AqiCategory;
    use crate::domain::series::tests::{hour, reading_at};

    fn series(pm25: &[f64]) -> Vec<Reading> {
        pm25.iter()
            .enumerate()
            .map(|(h, v)| reading_at(h as i64, *v))
            .collect()
    }

    #[test]
    fn test_empty_range_errors() {
        let empty: Vec<Reading> = Vec::new();
        assert_eq!(
            current_aqi(&empty, OutOfRangePolicy::Extrapolate),
            Err(DashboardError::EmptyRange)
        );
        assert_eq!(current_weather(&empty), Err(DashboardError::EmptyRange));
        assert_eq!(
            summary_statistics(&empty, Parameter::Pm25),
            Err(DashboardError::EmptyRange)
        );
        assert_eq!(
            project_forward(&empty, Parameter::Pm25, 24, &Persistence),
            Err(DashboardError::EmptyRange)
        );
    }

    #[test]
    fn test_current_aqi_uses_latest_reading() {
        let result = current_aqi(&series(&[200.0, 12.0]), OutOfRangePolicy::Extrapolate).unwrap();
        assert_eq!(result.value, 50);
        assert_eq!(result.category, AqiCategory::Good);
    }

    #[test]
    fn test_current_weather() {
        let mut readings = series(&[1.0, 2.0]);
        readings[1].temperature = 31.5;
        readings[1].humidity = 40.0;
        readings[1].wind_speed = 3.2;
        let weather = current_weather(&readings).unwrap();
        assert_eq!(
            weather,
            WeatherSnapshot {
                temperature: 31.5,
                humidity: 40.0,
                wind_speed: 3.2
            }
        );
    }

    #[test]
    fn test_chart_series_is_independent_of_kind() {
        let readings = series(&[1.0, 2.0, 3.0]);
        let line = chart_series(&readings, Parameter::Pm25, ChartKind::Line);
        let bar = chart_series(&readings, Parameter::Pm25, ChartKind::Bar);
        assert_eq!(line.points, bar.points);
        assert_eq!(line.points[2], TimeSeriesPoint::new(hour(2), 3.0));
        assert_eq!(bar.kind, ChartKind::Bar);
    }

    #[test]
    fn test_comparison_pairs_by_row() {
        let mut readings = series(&[1.0, 2.0]);
        readings[0].pm10 = 10.0;
        readings[1].pm10 = 20.0;
        let comparison = comparison_series(&readings, Parameter::Pm25, Parameter::Pm10);
        assert_eq!(comparison.points, vec![(1.0, 10.0), (2.0, 20.0)]);
    }

    #[test]
    fn test_alert_raised_above_threshold() {
        let events = evaluate_alerts(
            &series(&[75.0]),
            &[Parameter::Pm25],
            &AlertThresholds::new([(Parameter::Pm25, 50.0)]),
        );
        assert_eq!(
            events,
            vec![AlertEvent {
                parameter: Parameter::Pm25,
                observed_max: 75.0,
                threshold: 50.0
            }]
        );
    }

    #[test]
    fn test_no_alert_at_or_below_threshold() {
        let events = evaluate_alerts(
            &series(&[10.0, 50.0, 49.9]),
            &[Parameter::Pm25],
            &AlertThresholds::new([(Parameter::Pm25, 50.0)]),
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_alerts_follow_selection_order() {
        let mut readings = series(&[60.0, 20.0]);
        readings[1].o3 = 150.0;
        readings[0].pm10 = 101.0;
        let events = evaluate_alerts(
            &readings,
            &[Parameter::O3, Parameter::No2, Parameter::Pm25, Parameter::O3, Parameter::Pm10],
            &AlertThresholds::default(),
        );
        let order: Vec<Parameter> = events.iter().map(|e| e.parameter).collect();
        assert_eq!(order, vec![Parameter::O3, Parameter::Pm25, Parameter::Pm10]);
        assert_eq!(events[0].observed_max, 150.0);
    }

    #[test]
    fn test_alerts_on_empty_range() {
        assert!(evaluate_alerts(&[], &[Parameter::Pm25], &AlertThresholds::default()).is_empty());
    }

    #[test]
    fn test_project_forward_windows_history() {
        let readings = series(&vec![5.0; 200]);
        let projection = project_forward(&readings, Parameter::Pm25, 24, &Persistence).unwrap();
        assert_eq!(projection.historical.len(), HISTORY_WINDOW_HOURS);
        assert_eq!(projection.historical[0].timestamp, hour(32));
        assert_eq!(projection.projected.len(), 24);
        assert_eq!(projection.projected[0].timestamp, hour(200));
        assert_eq!(projection.projected[23].timestamp, hour(223));
        assert!(projection.projected.iter().all(|p| p.value == 5.0));
    }

    #[test]
    fn test_project_forward_short_series() {
        let readings = series(&[1.0, 2.0, 3.0]);
        let model = GaussianNoise::new(2.0, Some(1)).unwrap();
        let projection = project_forward(&readings, Parameter::Pm25, 6, &model).unwrap();
        assert_eq!(projection.historical.len(), 3);
        assert_eq!(projection.projected.len(), 6);
        assert_eq!(projection.projected[0].timestamp, hour(3));
    }

    #[test]
    fn test_summary_statistics_sample_std_dev() {
        let stats = summary_statistics(&series(&[10.0, 20.0, 30.0]), Parameter::Pm25).unwrap();
        assert_eq!(stats.last, 30.0);
        assert_eq!(stats.mean, 20.0);
        assert!((stats.std_dev - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_summary_statistics_needs_two_readings() {
        let error = summary_statistics(&series(&[10.0]), Parameter::Pm25).unwrap_err();
        assert_eq!(
            error,
            DashboardError::InsufficientReadings {
                needed: 2,
                found: 1
            }
        );
        assert_eq!(
            error.to_string(),
            "at least 2 readings are needed, the selected range has 1"
        );
    }
}
