// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod csv_codec;
pub mod csv_source;
pub mod http_response;
pub mod sample_data;
