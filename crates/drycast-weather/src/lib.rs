//! Forecast data for drycast
//!
//! Holds the hourly forecast model, decodes Open-Meteo responses and exposes
//! the `ForecastProvider` seam the rest of the workspace fetches through.

pub mod types;
pub mod openmeteo;
pub mod provider;

pub use types::*;
pub use openmeteo::{parse_response, TimeAxis};
pub use provider::{ForecastProvider, OpenMeteoFile, StaticForecast};
