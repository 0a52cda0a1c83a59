use crate::error::ConfigError;
use anyhow::{Context, Result};
use drycast_drying::{CloudScheme, HeuristicPreset, ScorerConfig};
use drycast_weather::Location;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the forecast is for
    #[serde(default)]
    pub location: LocationConfig,

    /// Forecast source
    #[serde(default)]
    pub forecast: ForecastConfig,

    /// Heuristic settings
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Output settings
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub name: Option<String>,
}

impl LocationConfig {
    pub fn to_location(&self) -> Location {
        Location {
            latitude: self.latitude,
            longitude: self.longitude,
            name: self.name.clone(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: 14.5995,
            longitude: 120.9842,
            name: Some("Manila".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Saved Open-Meteo forecast response
    #[serde(default = "default_forecast_source")]
    pub source: PathBuf,
}

fn default_forecast_source() -> PathBuf {
    PathBuf::from("forecast.json")
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            source: default_forecast_source(),
        }
    }
}

/// Heuristic selection. `cloud_scheme` and `daylight_adjustment` override the preset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub preset: HeuristicPreset,
    #[serde(default)]
    pub cloud_scheme: Option<CloudScheme>,
    #[serde(default)]
    pub daylight_adjustment: Option<bool>,
}

impl ScoringConfig {
    pub fn scorer_config(&self) -> ScorerConfig {
        let mut config = self.preset.config();
        if let Some(scheme) = self.cloud_scheme {
            config.cloud_scheme = scheme;
        }
        if let Some(daylight) = self.daylight_adjustment {
            config.daylight_adjustment = daylight;
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,
    /// List every hour before the best/neutral summary (text format only)
    #[serde(default = "default_show_all_hours")]
    pub show_all_hours: bool,
}

fn default_show_all_hours() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            show_all_hours: default_show_all_hours(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields the default config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.display().to_string()).into());
                }
                p.to_path_buf()
            }
            None => {
                let default_path = Self::config_path()?;
                if !default_path.exists() {
                    tracing::info!(
                        "No config at {}, using defaults",
                        default_path.display()
                    );
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = Self::load(path)?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if !(-90.0..=90.0).contains(&self.location.latitude) {
            result.add_error(
                "location.latitude",
                format!("Latitude must be within ±90, got {}", self.location.latitude),
            );
        }
        if !(-180.0..=180.0).contains(&self.location.longitude) {
            result.add_error(
                "location.longitude",
                format!("Longitude must be within ±180, got {}", self.location.longitude),
            );
        }

        if self.forecast.source.as_os_str().is_empty() {
            result.add_error("forecast.source", "Forecast source path is empty");
        } else if !self.forecast.source.exists() {
            result.add_warning(
                "forecast.source",
                format!("Path does not exist: {}", self.forecast.source.display()),
            );
        }

        if self.report.format == ReportFormat::Json && !self.report.show_all_hours {
            result.add_warning(
                "report.show_all_hours",
                "Ignored for JSON output, which always includes every hour",
            );
        }

        result
    }

    /// Get the path to the default configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("drycast");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml(
            r#"
            [location]
            latitude = 52.52
            longitude = 13.41
            name = "Berlin"

            [forecast]
            source = "/tmp/berlin.json"

            [scoring]
            preset = "daylight"

            [report]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.location.name.as_deref(), Some("Berlin"));
        assert_eq!(config.forecast.source, PathBuf::from("/tmp/berlin.json"));
        assert_eq!(config.scoring.scorer_config(), ScorerConfig::daylight());
        assert_eq!(config.report.format, ReportFormat::Json);
        assert!(config.report.show_all_hours);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.scoring.scorer_config(), ScorerConfig::default());
        assert_eq!(config.forecast.source, PathBuf::from("forecast.json"));
        assert_eq!(config.report.format, ReportFormat::Text);
    }

    #[test]
    fn test_scoring_overrides_preset() {
        let config = Config::from_toml(
            r#"
            [scoring]
            preset = "classic"
            cloud_scheme = "fine"
            daylight_adjustment = true
            "#,
        )
        .unwrap();

        let scorer = config.scoring.scorer_config();
        assert_eq!(scorer.cloud_scheme, CloudScheme::Fine);
        assert!(scorer.daylight_adjustment);
    }

    #[test]
    fn test_malformed_toml() {
        let err = Config::from_toml("[scoring\npreset = ").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_unknown_preset_is_parse_error() {
        let err = Config::from_toml("[scoring]\npreset = \"sunny\"").unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_invalid_latitude() {
        let mut config = Config::default();
        config.location.latitude = 123.0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "location.latitude"));
    }

    #[test]
    fn test_empty_source_is_error() {
        let mut config = Config::default();
        config.forecast.source = PathBuf::new();
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "forecast.source"));
    }

    #[test]
    fn test_missing_source_is_warning() {
        let mut config = Config::default();
        config.forecast.source = PathBuf::from("/nonexistent/drycast/forecast.json");
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "forecast.source"));
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[location]\nlatitude = 1.5\nlongitude = 2.5").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.location.latitude, 1.5);
        assert!(config.location.name.is_none());
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/drycast.toml"))).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_validated_rejects_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[location]\nlatitude = 95.0\nlongitude = 0.0").unwrap();

        let err = Config::load_validated(Some(file.path())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
