use crate::application::dashboard_service::PipelineSettings;
use crate::application::forecast::GaussianNoise;
use crate::domain::alert::AlertThresholds;
use crate::domain::aqi::OutOfRangePolicy;
use crate::domain::reading::Parameter;
use crate::infrastructure::sample_data::DEFAULT_SEED;
use anyhow::ensure;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub aqi: AqiSettings,
    #[serde(default)]
    pub alerts: AlertSettings,
    #[serde(default)]
    pub forecast: ForecastSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    #[default]
    Sample,
    Csv,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    #[serde(default)]
    pub source: DataSourceKind,
    pub path: Option<PathBuf>,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            source: DataSourceKind::default(),
            path: None,
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AqiSettings {
    #[serde(default)]
    pub out_of_range: OutOfRangePolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertSettings {
    #[serde(default = "default_pm25_ceiling")]
    pub pm25: f64,
    #[serde(default = "default_pm10_ceiling")]
    pub pm10: f64,
    #[serde(default = "default_o3_ceiling")]
    pub o3: f64,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            pm25: default_pm25_ceiling(),
            pm10: default_pm10_ceiling(),
            o3: default_o3_ceiling(),
        }
    }
}

impl AlertSettings {
    pub fn thresholds(&self) -> AlertThresholds {
        AlertThresholds::new([
            (Parameter::Pm25, self.pm25),
            (Parameter::Pm10, self.pm10),
            (Parameter::O3, self.o3),
        ])
    }
}

/// Longest projection the prediction page will compute (one year)
pub const MAX_HORIZON_HOURS: usize = 24 * 366;

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastSettings {
    #[serde(default = "default_horizon_hours")]
    pub horizon_hours: usize,
    #[serde(default = "default_noise_std_dev")]
    pub noise_std_dev: f64,
    pub seed: Option<u64>,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            horizon_hours: default_horizon_hours(),
            noise_std_dev: default_noise_std_dev(),
            seed: None,
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8050".to_string()
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_pm25_ceiling() -> f64 {
    50.0
}

fn default_pm10_ceiling() -> f64 {
    100.0
}

fn default_o3_ceiling() -> f64 {
    100.0
}

fn default_horizon_hours() -> usize {
    24
}

fn default_noise_std_dev() -> f64 {
    GaussianNoise::DEFAULT_STD_DEV
}

impl AppConfig {
    /// Reject values that deserialize fine but cannot be served
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.forecast.horizon_hours <= MAX_HORIZON_HOURS,
            "forecast.horizon_hours must be at most {}, got {}",
            MAX_HORIZON_HOURS,
            self.forecast.horizon_hours
        );
        ensure!(
            self.forecast.noise_std_dev.is_finite() && self.forecast.noise_std_dev >= 0.0,
            "forecast.noise_std_dev must be a non-negative number, got {}",
            self.forecast.noise_std_dev
        );
        Ok(())
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            aqi_policy: self.aqi.out_of_range,
            thresholds: self.alerts.thresholds(),
            horizon_hours: self.forecast.horizon_hours,
        }
    }
}

/// `config/dashboard.{toml,...}` if present, overridden by `AQ__SECTION__KEY`
/// environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("AQ")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = settings.try_deserialize()?;
    app_config.validate()?;
    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(text: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_validate_bounds_forecast_settings() {
        assert!(from_toml("").validate().is_ok());
        assert!(from_toml("[forecast]\nhorizon_hours = 8784").validate().is_ok());

        let error = from_toml("[forecast]\nhorizon_hours = 3000000000000000")
            .validate()
            .unwrap_err();
        assert!(error.to_string().contains("forecast.horizon_hours"));

        let error = from_toml("[forecast]\nnoise_std_dev = -1.0")
            .validate()
            .unwrap_err();
        assert!(error.to_string().contains("forecast.noise_std_dev"));
    }

    #[test]
    fn test_defaults_without_any_source() {
        let config = from_toml("");
        assert_eq!(config.server.bind_addr, "0.0.0.0:8050");
        assert_eq!(config.data.source, DataSourceKind::Sample);
        assert_eq!(config.data.seed, 42);
        assert_eq!(config.aqi.out_of_range, OutOfRangePolicy::Extrapolate);
        assert_eq!(config.alerts.thresholds(), AlertThresholds::default());
        assert_eq!(config.forecast.horizon_hours, 24);
        assert_eq!(config.forecast.noise_std_dev, 2.0);
        assert_eq!(config.forecast.seed, None);
    }

    #[test]
    fn test_overrides() {
        let config = from_toml(
            r#"
            [data]
            source = "csv"
            path = "data/air.csv"

            [aqi]
            out_of_range = "clamp"

            [alerts]
            pm25 = 35.5

            [forecast]
            horizon_hours = 48
            seed = 9
            "#,
        );
        assert_eq!(config.data.source, DataSourceKind::Csv);
        assert_eq!(config.data.path, Some(PathBuf::from("data/air.csv")));

        let settings = config.pipeline_settings();
        assert_eq!(settings.aqi_policy, OutOfRangePolicy::Clamp);
        assert_eq!(settings.thresholds.get(Parameter::Pm25), Some(35.5));
        assert_eq!(settings.thresholds.get(Parameter::Pm10), Some(100.0));
        assert_eq!(settings.horizon_hours, 48);
        assert_eq!(config.forecast.seed, Some(9));
    }
}
