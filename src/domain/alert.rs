// Threshold alerts
use super::reading::Parameter;
use serde::Serialize;
use std::collections::BTreeMap;

/// Fixed per-parameter ceilings. Parameters without an entry never alert.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertThresholds {
    ceilings: BTreeMap<Parameter, f64>,
}

impl AlertThresholds {
    pub fn new(ceilings: impl IntoIterator<Item = (Parameter, f64)>) -> Self {
        Self {
            ceilings: ceilings.into_iter().collect(),
        }
    }

    pub fn get(&self, parameter: Parameter) -> Option<f64> {
        self.ceilings.get(&parameter).copied()
    }

    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        self.ceilings.keys().copied()
    }
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self::new([
            (Parameter::Pm25, 50.0),
            (Parameter::Pm10, 100.0),
            (Parameter::O3, 100.0),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEvent {
    pub parameter: Parameter,
    pub observed_max: f64,
    pub threshold: f64,
}

impl AlertEvent {
    pub fn message(&self) -> String {
        format!(
            "Warning: {} reached {:.1} (Threshold: {})",
            self.parameter, self.observed_max, self.threshold
        )
    }
}

/// Alerts panel state for the current selection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AlertsView {
    NotConfigured { message: String },
    Clear { message: String },
    Triggered { alerts: Vec<AlertNotice> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertNotice {
    #[serde(flatten)]
    pub event: AlertEvent,
    pub message: String,
}

impl AlertsView {
    pub fn from_events(selected: &[Parameter], events: Vec<AlertEvent>) -> Self {
        if selected.is_empty() {
            return AlertsView::NotConfigured {
                message: "No alerts selected".to_string(),
            };
        }
        if events.is_empty() {
            return AlertsView::Clear {
                message: "No threshold violations detected".to_string(),
            };
        }
        AlertsView::Triggered {
            alerts: events
                .into_iter()
                .map(|event| AlertNotice {
                    message: event.message(),
                    event,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let thresholds = AlertThresholds::default();
        assert_eq!(thresholds.get(Parameter::Pm25), Some(50.0));
        assert_eq!(thresholds.get(Parameter::Pm10), Some(100.0));
        assert_eq!(thresholds.get(Parameter::O3), Some(100.0));
        assert_eq!(thresholds.get(Parameter::No2), None);
    }

    #[test]
    fn test_event_message() {
        let event = AlertEvent {
            parameter: Parameter::Pm25,
            observed_max: 75.04,
            threshold: 50.0,
        };
        assert_eq!(event.message(), "Warning: PM25 reached 75.0 (Threshold: 50)");
    }

    #[test]
    fn test_view_states() {
        assert!(matches!(
            AlertsView::from_events(&[], Vec::new()),
            AlertsView::NotConfigured { .. }
        ));
        assert!(matches!(
            AlertsView::from_events(&[Parameter::O3], Vec::new()),
            AlertsView::Clear { .. }
        ));

        let event = AlertEvent {
            parameter: Parameter::O3,
            observed_max: 120.0,
            threshold: 100.0,
        };
        match AlertsView::from_events(&[Parameter::O3], vec![event.clone()]) {
            AlertsView::Triggered { alerts } => {
                assert_eq!(alerts.len(), 1);
                assert_eq!(alerts[0].event, event);
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn test_view_serializes_with_status_tag() {
        let json = serde_json::to_value(AlertsView::from_events(&[], Vec::new())).unwrap();
        assert_eq!(json["status"], "not_configured");
        assert_eq!(json["message"], "No alerts selected");
    }
}
