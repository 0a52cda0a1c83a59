use crate::openmeteo::parse_response;
use crate::types::{ForecastSeries, Location, WeatherError};
use std::path::PathBuf;

/// Source of hourly forecasts.
///
/// Implementations own acquisition (HTTP, files, fixtures). Callers receive an
/// already-decoded series and never touch platform location services.
pub trait ForecastProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Returns the hourly forecast for `location`.
    ///
    /// # Errors
    ///
    /// Returns a `WeatherError` when the forecast cannot be obtained or decoded.
    fn fetch(&self, location: &Location) -> Result<ForecastSeries, WeatherError>;
}

/// Provider returning a series held in memory
#[derive(Debug, Clone)]
pub struct StaticForecast {
    series: ForecastSeries,
}

impl StaticForecast {
    pub fn new(series: ForecastSeries) -> Self {
        Self { series }
    }
}

impl ForecastProvider for StaticForecast {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self, location: &Location) -> Result<ForecastSeries, WeatherError> {
        tracing::debug!("Serving static forecast for {}", location.label());
        Ok(self.series.clone())
    }
}

/// Provider reading a saved Open-Meteo forecast response from disk
#[derive(Debug, Clone)]
pub struct OpenMeteoFile {
    path: PathBuf,
}

impl OpenMeteoFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ForecastProvider for OpenMeteoFile {
    fn name(&self) -> &str {
        "open-meteo-file"
    }

    fn fetch(&self, location: &Location) -> Result<ForecastSeries, WeatherError> {
        if !location.is_valid() {
            return Err(WeatherError::Location(format!(
                "coordinates out of range: {}, {}",
                location.latitude, location.longitude
            )));
        }

        tracing::info!(
            "Reading forecast for {} from {}",
            location.label(),
            self.path.display()
        );

        let json = std::fs::read_to_string(&self.path)?;
        parse_response(&json)
    }
}
