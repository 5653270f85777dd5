// In-memory time-series store
use super::errors::DashboardError;
use super::reading::{Parameter, Reading};
use chrono::NaiveDateTime;

/// Ordered, timestamp-unique table of readings.
///
/// Built once at startup through [`SeriesStore::load`] and read-only
/// afterwards. Range filtering borrows a contiguous slice, so derived views
/// never copy the table.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    readings: Vec<Reading>,
}

impl SeriesStore {
    /// Validate and take ownership of a series.
    ///
    /// Timestamps must be strictly increasing (ascending and unique) and every
    /// measurement finite.
    pub fn load(readings: Vec<Reading>) -> Result<Self, DashboardError> {
        for (index, reading) in readings.iter().enumerate() {
            if let Some(parameter) = Parameter::ALL
                .into_iter()
                .find(|p| !reading.value(*p).is_finite())
            {
                return Err(DashboardError::InvalidSeries {
                    index,
                    reason: format!("{} is not a finite number", parameter),
                });
            }
            if index > 0 {
                let previous = &readings[index - 1].timestamp;
                if reading.timestamp == *previous {
                    return Err(DashboardError::InvalidSeries {
                        index,
                        reason: format!("duplicate timestamp {}", reading.timestamp),
                    });
                }
                if reading.timestamp < *previous {
                    return Err(DashboardError::InvalidSeries {
                        index,
                        reason: format!(
                            "timestamp {} is earlier than {}",
                            reading.timestamp, previous
                        ),
                    });
                }
            }
        }

        Ok(Self { readings })
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// First and last timestamps, `None` for an empty store
    pub fn bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match (self.readings.first(), self.readings.last()) {
            (Some(first), Some(last)) => Some((first.timestamp, last.timestamp)),
            _ => None,
        }
    }

    /// Readings with `start <= timestamp <= end`, in storage order.
    /// An inverted range yields an empty slice.
    pub fn filter_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> &[Reading] {
        if start > end {
            return &[];
        }
        let from = self.readings.partition_point(|r| r.timestamp < start);
        let to = self.readings.partition_point(|r| r.timestamp <= end);
        &self.readings[from..to]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    pub(crate) fn hour(h: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + Duration::hours(h)
    }

    pub(crate) fn reading_at(h: i64, pm25: f64) -> Reading {
        Reading {
            timestamp: hour(h),
            pm25,
            pm10: 40.0,
            o3: 30.0,
            no2: 20.0,
            temperature: 25.0,
            humidity: 60.0,
            wind_speed: 10.0,
        }
    }

    fn store(n: i64) -> SeriesStore {
        SeriesStore::load((0..n).map(|h| reading_at(h, h as f64)).collect()).unwrap()
    }

    #[test]
    fn test_load_rejects_duplicate_timestamps() {
        let err = SeriesStore::load(vec![reading_at(0, 1.0), reading_at(0, 2.0)]).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidSeries { index: 1, .. }));
    }

    #[test]
    fn test_load_rejects_descending_timestamps() {
        let err = SeriesStore::load(vec![reading_at(2, 1.0), reading_at(1, 2.0)]).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidSeries { index: 1, .. }));
    }

    #[test]
    fn test_load_rejects_non_finite_values() {
        let mut bad = reading_at(1, 1.0);
        bad.humidity = f64::NAN;
        let err = SeriesStore::load(vec![reading_at(0, 1.0), bad]).unwrap_err();
        match err {
            DashboardError::InvalidSeries { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("Humidity"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_load_accepts_empty_series() {
        let store = SeriesStore::load(Vec::new()).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.bounds(), None);
    }

    #[test]
    fn test_filter_range_is_inclusive() {
        let store = store(10);
        let slice = store.filter_range(hour(2), hour(5));
        let hours: Vec<f64> = slice.iter().map(|r| r.pm25).collect();
        assert_eq!(hours, vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_filter_range_matches_predicate_count() {
        let store = store(48);
        for (start, end) in [(0, 47), (-5, 3), (10, 10), (40, 100), (50, 60), (7, 6)] {
            let expected: Vec<&Reading> = store
                .readings()
                .iter()
                .filter(|r| r.timestamp >= hour(start) && r.timestamp <= hour(end))
                .collect();
            let got: Vec<&Reading> = store.filter_range(hour(start), hour(end)).iter().collect();
            assert_eq!(got, expected, "range {start}..={end}");
        }
    }

    #[test]
    fn test_filter_range_between_samples_is_empty() {
        let store = store(4);
        let start = hour(1) + Duration::minutes(10);
        let end = hour(1) + Duration::minutes(50);
        assert!(store.filter_range(start, end).is_empty());
    }

    #[test]
    fn test_bounds() {
        assert_eq!(store(3).bounds(), Some((hour(0), hour(2))));
    }
}
