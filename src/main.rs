// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use air_quality_dashboard::application::dashboard_service::DashboardService;
use air_quality_dashboard::application::forecast::GaussianNoise;
use air_quality_dashboard::application::reading_source::ReadingSource;
use air_quality_dashboard::domain::series::SeriesStore;
use air_quality_dashboard::infrastructure::config::{DataSourceKind, load_app_config};
use air_quality_dashboard::infrastructure::csv_source::CsvFileSource;
use air_quality_dashboard::infrastructure::sample_data::SampleDataSource;
use air_quality_dashboard::presentation::app_state::AppState;
use air_quality_dashboard::presentation::router::create_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let app_config = load_app_config()?;

    // Load the series once; the process does not start on corrupt data
    let source: Box<dyn ReadingSource> = match app_config.data.source {
        DataSourceKind::Sample => Box::new(SampleDataSource::first_quarter_2024(app_config.data.seed)),
        DataSourceKind::Csv => {
            let path = app_config
                .data
                .path
                .clone()
                .context("data.path is required when data.source is \"csv\"")?;
            Box::new(CsvFileSource::new(path))
        }
    };
    tracing::info!("Loading readings from {}", source.describe());

    let readings = source.load_readings().await?;
    let store = SeriesStore::load(readings).context("Refusing to start with an invalid series")?;
    match store.bounds() {
        Some((start, end)) => {
            tracing::info!("Loaded {} readings from {} to {}", store.len(), start, end)
        }
        None => tracing::warn!("Data source is empty, every view will report an empty range"),
    }

    // Create services (application layer)
    let projection = GaussianNoise::new(app_config.forecast.noise_std_dev, app_config.forecast.seed)
        .context("forecast.noise_std_dev must be a non-negative number")?;
    let dashboard_service = DashboardService::new(
        Arc::new(store),
        app_config.pipeline_settings(),
        Arc::new(projection),
    );

    // Build router (presentation layer)
    let router = create_router(Arc::new(AppState { dashboard_service }));

    // Start server
    let addr: SocketAddr = app_config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid server.bind_addr '{}'", app_config.server.bind_addr))?;
    tracing::info!("Starting air-quality-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
