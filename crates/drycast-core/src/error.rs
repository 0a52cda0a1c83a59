//! Centralized error types for drycast.
//!
//! Each variant carries full context for logs, and `user_message()` gives a
//! short line suitable for printing to the terminal.

use drycast_drying::InputShapeError;
use drycast_weather::WeatherError;
use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Forecast error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Malformed forecast: {0}")]
    Shape(#[from] InputShapeError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a non-technical message for the terminal.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Weather(e) => weather_message(e),
            AppError::Shape(_) => "The forecast columns do not line up. Fetch a fresh forecast.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

fn weather_message(e: &WeatherError) -> &'static str {
    match e {
        WeatherError::Io(_) => "Could not read the forecast file. Check forecast.source.",
        WeatherError::Parse(_) => "The forecast file is not a valid Open-Meteo response.",
        WeatherError::Location(_) => "The configured location is invalid. Check your settings.",
        WeatherError::NoData(_) => "The forecast has no hourly data.",
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration file not found. Check the path.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}
