pub mod app;
pub mod config;
pub mod error;
pub mod report;

pub use app::{App, DryingReport};
pub use config::{Config, ForecastConfig, LocationConfig, ReportConfig, ReportFormat, ScoringConfig};
pub use error::{AppError, ConfigError};

use anyhow::Result;

/// Initialize logging. Output goes to stderr so stdout carries only the report.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("drycast {} initialized", env!("CARGO_PKG_VERSION"));
    Ok(())
}
