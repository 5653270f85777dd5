// Application layer - Use cases and the derived-view pipeline
pub mod dashboard_service;
pub mod forecast;
pub mod pipeline;
pub mod reading_source;
