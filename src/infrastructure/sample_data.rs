// Synthetic hourly readings for demos and development
use crate::application::reading_source::ReadingSource;
use crate::domain::reading::Reading;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

pub const DEFAULT_SEED: u64 = 42;

/// Independent normal draws per column, hourly from `start` to `end` inclusive
#[derive(Debug, Clone)]
pub struct SampleDataSource {
    start: NaiveDateTime,
    end: NaiveDateTime,
    seed: u64,
}

impl SampleDataSource {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, seed: u64) -> Self {
        Self { start, end, seed }
    }

    /// First quarter of 2024, the range the dashboard ships with
    pub fn first_quarter_2024(seed: u64) -> Self {
        let midnight = |m, d| {
            NaiveDate::from_ymd_opt(2024, m, d)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .unwrap_or_default()
        };
        Self::new(midnight(1, 1), midnight(3, 31), seed)
    }

    pub fn generate(&self) -> anyhow::Result<Vec<Reading>> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let pm25 = Normal::new(25.0, 10.0)?;
        let pm10 = Normal::new(40.0, 15.0)?;
        let o3 = Normal::new(30.0, 8.0)?;
        let no2 = Normal::new(20.0, 5.0)?;
        let temperature = Normal::new(25.0, 3.0)?;
        let humidity = Normal::new(60.0, 10.0)?;
        let wind_speed = Normal::new(10.0, 3.0)?;

        let mut readings = Vec::new();
        let mut timestamp = self.start;
        while timestamp <= self.end {
            readings.push(Reading {
                timestamp,
                pm25: pm25.sample(&mut rng),
                pm10: pm10.sample(&mut rng),
                o3: o3.sample(&mut rng),
                no2: no2.sample(&mut rng),
                temperature: temperature.sample(&mut rng),
                humidity: humidity.sample(&mut rng),
                wind_speed: wind_speed.sample(&mut rng),
            });
            timestamp += Duration::hours(1);
        }

        Ok(readings)
    }
}

#[async_trait]
impl ReadingSource for SampleDataSource {
    fn describe(&self) -> String {
        format!("synthetic data {} to {} (seed {})", self.start, self.end, self.seed)
    }

    async fn load_readings(&self) -> anyhow::Result<Vec<Reading>> {
        self.generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::SeriesStore;

    #[test]
    fn test_first_quarter_is_hourly_and_inclusive() {
        let readings = SampleDataSource::first_quarter_2024(DEFAULT_SEED).generate().unwrap();
        // 90 days of 24 hours plus the closing midnight
        assert_eq!(readings.len(), 90 * 24 + 1);
        assert_eq!(readings[0].timestamp.to_string(), "2024-01-01 00:00:00");
        assert_eq!(readings[readings.len() - 1].timestamp.to_string(), "2024-03-31 00:00:00");
        assert!(SeriesStore::load(readings).is_ok());
    }

    #[test]
    fn test_seed_determines_output() {
        let source = SampleDataSource::first_quarter_2024(7);
        assert_eq!(source.generate().unwrap(), source.generate().unwrap());
        assert_ne!(
            source.generate().unwrap(),
            SampleDataSource::first_quarter_2024(8).generate().unwrap()
        );
    }

    #[test]
    fn test_columns_follow_their_distributions() {
        let readings = SampleDataSource::first_quarter_2024(DEFAULT_SEED).generate().unwrap();
        let mean = |f: fn(&Reading) -> f64| readings.iter().map(f).sum::<f64>() / readings.len() as f64;
        assert!((mean(|r| r.pm25) - 25.0).abs() < 1.5);
        assert!((mean(|r| r.humidity) - 60.0).abs() < 1.5);
        assert!((mean(|r| r.wind_speed) - 10.0).abs() < 0.5);
    }

    #[tokio::test]
    async fn test_load_readings() {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let source = SampleDataSource::new(start, start + Duration::hours(3), 1);
        assert_eq!(source.load_readings().await.unwrap().len(), 4);
        assert!(source.describe().contains("seed 1"));
    }
}
