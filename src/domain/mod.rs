// Domain layer - Pure types and logic, no I/O
pub mod alert;
pub mod aqi;
pub mod dashboard;
pub mod errors;
pub mod reading;
pub mod selection;
pub mod series;
pub mod telemetry;
