// AQI calculator - PM2.5 concentration to index and category
use serde::{Deserialize, Serialize};

/// One linear segment of the PM2.5 mapping:
/// (concentration low, concentration high, AQI low, AQI high)
struct Band {
    conc_low: f64,
    conc_high: f64,
    aqi_low: f64,
    aqi_high: f64,
}

static PM25_BANDS: [Band; 6] = [
    Band { conc_low: 0.0, conc_high: 12.0, aqi_low: 0.0, aqi_high: 50.0 },
    Band { conc_low: 12.1, conc_high: 35.4, aqi_low: 51.0, aqi_high: 100.0 },
    Band { conc_low: 35.5, conc_high: 55.4, aqi_low: 101.0, aqi_high: 150.0 },
    Band { conc_low: 55.5, conc_high: 150.4, aqi_low: 151.0, aqi_high: 200.0 },
    Band { conc_low: 150.5, conc_high: 250.4, aqi_low: 201.0, aqi_high: 300.0 },
    Band { conc_low: 250.5, conc_high: 500.4, aqi_low: 301.0, aqi_high: 500.0 },
];

/// Upper end of the concentration domain covered by the bands
pub const PM25_DOMAIN_MAX: f64 = 500.4;

/// What to do with concentrations outside `[0, 500.4]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutOfRangePolicy {
    /// Continue the nearest band's line
    #[default]
    Extrapolate,
    /// Clamp the concentration into the domain first
    Clamp,
}

/// Continuous AQI for a PM2.5 concentration (µg/m³).
///
/// Picks the first band whose upper bound is at least `pm25` (the last band
/// otherwise) and interpolates linearly inside it.
pub fn pm25_to_aqi(pm25: f64, policy: OutOfRangePolicy) -> f64 {
    let pm25 = match policy {
        OutOfRangePolicy::Extrapolate => pm25,
        OutOfRangePolicy::Clamp => pm25.clamp(0.0, PM25_DOMAIN_MAX),
    };

    let band = PM25_BANDS
        .iter()
        .find(|b| pm25 <= b.conc_high)
        .unwrap_or(&PM25_BANDS[PM25_BANDS.len() - 1]);

    // Multiply before dividing so the band ends land on exact values
    band.aqi_low + (band.aqi_high - band.aqi_low) * (pm25 - band.conc_low)
        / (band.conc_high - band.conc_low)
}

/// Integer AQI as displayed: truncated toward zero, with values within
/// rounding noise of an integer snapped to it.
pub fn truncate_aqi(aqi: f64) -> i32 {
    let nearest = aqi.round();
    if (aqi - nearest).abs() < 1e-9 {
        nearest as i32
    } else {
        aqi.trunc() as i32
    }
}

/// Health category of an AQI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthySensitive => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            AqiCategory::Good => "green",
            AqiCategory::Moderate => "yellow",
            AqiCategory::UnhealthySensitive => "orange",
            AqiCategory::Unhealthy => "red",
            AqiCategory::VeryUnhealthy => "purple",
            AqiCategory::Hazardous => "maroon",
        }
    }

    /// 0 (Good) through 5 (Hazardous)
    pub fn severity_tier(&self) -> u8 {
        *self as u8
    }
}

/// Map an AQI value onto its category. Total over the reals; NaN lands in
/// `Hazardous` because no upper bound admits it.
pub fn aqi_status(aqi: f64) -> AqiCategory {
    if aqi <= 50.0 {
        AqiCategory::Good
    } else if aqi <= 100.0 {
        AqiCategory::Moderate
    } else if aqi <= 150.0 {
        AqiCategory::UnhealthySensitive
    } else if aqi <= 200.0 {
        AqiCategory::Unhealthy
    } else if aqi <= 300.0 {
        AqiCategory::VeryUnhealthy
    } else {
        AqiCategory::Hazardous
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AqiResult {
    pub value: i32,
    pub category: AqiCategory,
    pub label: &'static str,
    pub color: &'static str,
    pub severity_tier: u8,
}

impl AqiResult {
    pub fn from_pm25(pm25: f64, policy: OutOfRangePolicy) -> Self {
        let value = truncate_aqi(pm25_to_aqi(pm25, policy));
        let category = aqi_status(value as f64);
        Self {
            value,
            category,
            label: category.label(),
            color: category.color(),
            severity_tier: category.severity_tier(),
        }
    }
}
