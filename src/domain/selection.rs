// Strongly typed UI selection
use super::reading::Parameter;
use super::telemetry::ChartKind;
use chrono::NaiveDateTime;

/// Everything the analysis page lets the user choose
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub parameter: Parameter,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub chart_kind: ChartKind,
    pub compare_a: Parameter,
    pub compare_b: Parameter,
    /// Alert parameters in the order the user ticked them, without repeats
    pub alerts: Vec<Parameter>,
}

impl Selection {
    /// Initial page state over the given range
    pub fn with_range(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            parameter: Parameter::Pm25,
            start,
            end,
            chart_kind: ChartKind::Line,
            compare_a: Parameter::Pm25,
            compare_b: Parameter::Pm10,
            alerts: Vec::new(),
        }
    }

    pub fn with_alerts(mut self, alerts: impl IntoIterator<Item = Parameter>) -> Self {
        self.alerts.clear();
        for parameter in alerts {
            if !self.alerts.contains(&parameter) {
                self.alerts.push(parameter);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::tests::hour;

    #[test]
    fn test_defaults() {
        let selection = Selection::with_range(hour(0), hour(5));
        assert_eq!(selection.parameter, Parameter::Pm25);
        assert_eq!(selection.chart_kind, ChartKind::Line);
        assert_eq!((selection.compare_a, selection.compare_b), (Parameter::Pm25, Parameter::Pm10));
        assert!(selection.alerts.is_empty());
    }

    #[test]
    fn test_alerts_keep_first_occurrence_order() {
        let selection = Selection::with_range(hour(0), hour(1)).with_alerts([
            Parameter::O3,
            Parameter::Pm25,
            Parameter::O3,
        ]);
        assert_eq!(selection.alerts, vec![Parameter::O3, Parameter::Pm25]);
    }
}
