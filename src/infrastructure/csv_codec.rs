// CSV import/export of the reading schema
use crate::domain::reading::{Parameter, Reading, TIMESTAMP_COLUMN};
use anyhow::{Context, Result};
use std::io::Read;

/// Column names in export order
pub fn header() -> impl Iterator<Item = &'static str> {
    std::iter::once(TIMESTAMP_COLUMN).chain(Parameter::ALL.into_iter().map(|p| p.as_str()))
}

/// Serialize readings with a header row and ISO-8601 timestamps, no index column.
/// An empty slice still yields the header.
pub fn export_csv(readings: &[Reading]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(header()).context("Failed to write CSV header")?;
    for (i, reading) in readings.iter().enumerate() {
        writer
            .serialize(reading)
            .with_context(|| format!("Failed to write CSV row {}", i + 1))?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV buffer: {}", e.error()))
}

/// Parse a table with the reading schema. Columns are matched by name, so
/// order does not matter and extra columns are ignored.
pub fn parse_csv<R: Read>(source: R) -> Result<Vec<Reading>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut readings = Vec::new();
    for (i, record) in reader.deserialize::<Reading>().enumerate() {
        let reading = record.with_context(|| format!("Invalid CSV record {}", i + 1))?;
        readings.push(reading);
    }

    Ok(readings)
}
