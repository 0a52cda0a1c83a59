use drycast_drying::{Classification, Classifier, DryingScorer, ScorerConfig};
use drycast_weather::{ForecastProvider, ForecastSeries, Location, OpenMeteoFile};

use crate::error::AppError;
use crate::Config;

/// One classified forecast, ready to render
#[derive(Debug, Clone)]
pub struct DryingReport {
    pub location: Location,
    pub provider: String,
    pub scorer: ScorerConfig,
    pub series: ForecastSeries,
    pub classification: Classification,
}

/// Wires the configured forecast provider to the classifier
pub struct App {
    config: Config,
    provider: Box<dyn ForecastProvider>,
    classifier: Classifier,
}

impl App {
    /// Create an application reading forecasts from `config.forecast.source`
    pub fn new(config: Config) -> Self {
        let provider = Box::new(OpenMeteoFile::new(config.forecast.source.clone()));
        Self::with_provider(config, provider)
    }

    /// Create an application with an injected forecast provider
    pub fn with_provider(config: Config, provider: Box<dyn ForecastProvider>) -> Self {
        let scorer = DryingScorer::new(config.scoring.scorer_config());
        Self {
            config,
            provider,
            classifier: Classifier::new(scorer),
        }
    }

    /// Fetch the forecast and classify every hour.
    ///
    /// # Errors
    ///
    /// Fails when the provider cannot produce a forecast or the forecast
    /// columns are misaligned.
    pub fn run(&self) -> Result<DryingReport, AppError> {
        let location = self.config.location.to_location();
        tracing::info!(
            "Fetching forecast for {} via {}",
            location.label(),
            self.provider.name()
        );

        let series = self.provider.fetch(&location)?;
        if series.is_empty() {
            tracing::warn!("Forecast for {} has no hours", location.label());
        }

        let classification = self.classifier.classify(&series)?;
        tracing::info!(
            "Scored {} hours: {} best, {} neutral",
            classification.len(),
            classification.best.len(),
            classification.neutral.len()
        );

        Ok(DryingReport {
            location,
            provider: self.provider.name().to_string(),
            scorer: *self.classifier.scorer().config(),
            series,
            classification,
        })
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }
}
