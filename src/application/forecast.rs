// Projection models for the prediction chart
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use thiserror::Error;

/// Produces `horizon` future values from the last observed one.
///
/// The pipeline only depends on this trait, so a fitted model can replace the
/// naive ones without touching callers.
pub trait ProjectionModel: Send + Sync {
    fn project(&self, last_value: f64, horizon: usize) -> Vec<f64>;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    #[error("noise standard deviation must be a finite non-negative number, got {0}")]
    InvalidStdDev(f64),
}

/// Last value plus zero-mean Gaussian noise. Not a forecast.
#[derive(Debug, Clone)]
pub struct GaussianNoise {
    noise: Normal<f64>,
    seed: Option<u64>,
}

impl GaussianNoise {
    pub const DEFAULT_STD_DEV: f64 = 2.0;

    /// With a seed every call returns the same perturbations
    pub fn new(std_dev: f64, seed: Option<u64>) -> Result<Self, ForecastError> {
        // Normal::new only rejects non-finite deviations
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(ForecastError::InvalidStdDev(std_dev));
        }
        let noise = Normal::new(0.0, std_dev).map_err(|_| ForecastError::InvalidStdDev(std_dev))?;
        Ok(Self { noise, seed })
    }
}

impl ProjectionModel for GaussianNoise {
    fn project(&self, last_value: f64, horizon: usize) -> Vec<f64> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        (0..horizon)
            .map(|_| last_value + self.noise.sample(&mut rng))
            .collect()
    }
}

/// Repeats the last value
#[derive(Debug, Clone, Copy, Default)]
pub struct Persistence;

impl ProjectionModel for Persistence {
    fn project(&self, last_value: f64, horizon: usize) -> Vec<f64> {
        vec![last_value; horizon]
    }
}
