// CSV file repository
use crate::application::reading_source::ReadingSource;
use crate::domain::reading::Reading;
use crate::infrastructure::csv_codec::parse_csv;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReadingSource for CsvFileSource {
    fn describe(&self) -> String {
        format!("CSV file {}", self.path.display())
    }

    async fn load_readings(&self) -> Result<Vec<Reading>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        let readings = parse_csv(bytes.as_slice())
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;

        tracing::debug!("Parsed {} rows from {}", readings.len(), self.path.display());
        Ok(readings)
    }
}
