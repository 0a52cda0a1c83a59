use drycast_weather::{ForecastSeries, HourlySample};
use serde::{Deserialize, Serialize};

/// Cloud cover banding used for the sunlight factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CloudScheme {
    /// Two open bands, `(0, 30)` and `(30, 60)`. 0, 30 and 60 score nothing.
    Coarse,
    /// Four closed bands covering 0-100 with no gaps
    #[default]
    Fine,
}

impl CloudScheme {
    /// Points awarded for the given cloud cover percentage
    pub fn points(&self, cloud_cover: f64) -> i32 {
        match self {
            Self::Coarse => {
                if cloud_cover > 0.0 && cloud_cover < 30.0 {
                    2
                } else if cloud_cover > 30.0 && cloud_cover < 60.0 {
                    1
                } else {
                    0
                }
            }
            Self::Fine => {
                if (0.0..=20.0).contains(&cloud_cover) {
                    3
                } else if cloud_cover > 20.0 && cloud_cover <= 50.0 {
                    2
                } else if cloud_cover > 50.0 && cloud_cover <= 80.0 {
                    1
                } else {
                    0
                }
            }
        }
    }
}

/// Tunable parts of the heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScorerConfig {
    #[serde(default)]
    pub cloud_scheme: CloudScheme,
    /// Adds +2 for daylight hours and -1 for night hours
    #[serde(default)]
    pub daylight_adjustment: bool,
}

impl ScorerConfig {
    /// Coarse cloud bands, no day/night term
    pub fn classic() -> Self {
        Self {
            cloud_scheme: CloudScheme::Coarse,
            daylight_adjustment: false,
        }
    }

    /// Fine cloud bands with the day/night term
    pub fn daylight() -> Self {
        Self {
            cloud_scheme: CloudScheme::Fine,
            daylight_adjustment: true,
        }
    }
}

/// Named heuristic variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicPreset {
    #[default]
    Default,
    Classic,
    Daylight,
}

impl HeuristicPreset {
    pub fn config(&self) -> ScorerConfig {
        match self {
            Self::Default => ScorerConfig::default(),
            Self::Classic => ScorerConfig::classic(),
            Self::Daylight => ScorerConfig::daylight(),
        }
    }
}

/// Points contributed by each factor for one hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoreBreakdown {
    /// The rain check fired and every other factor was skipped
    pub rain_override: bool,
    pub daylight: i32,
    pub humidity: i32,
    pub temperature: i32,
    pub wind: i32,
    pub cloud: i32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i32 {
        if self.rain_override {
            return 0;
        }
        self.daylight + self.humidity + self.temperature + self.wind + self.cloud
    }
}

/// Additive point system rating one forecast hour for drying laundry.
///
/// The score is an unbounded signed ordinal: the night penalty can push it
/// below zero and nothing caps it from above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DryingScorer {
    config: ScorerConfig,
}

impl DryingScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn score(&self, sample: &HourlySample) -> i32 {
        self.breakdown(sample).total()
    }

    /// Scores every hour of `series` lazily, in time order
    pub fn scores<'a>(&'a self, series: &'a ForecastSeries) -> impl Iterator<Item = i32> + 'a {
        series.samples().map(move |sample| self.score(&sample))
    }

    pub fn breakdown(&self, sample: &HourlySample) -> ScoreBreakdown {
        // High rain probability with almost no expected rain short-circuits to zero
        if sample.precipitation_probability > 50.0 && sample.precipitation < 0.2 {
            return ScoreBreakdown {
                rain_override: true,
                ..ScoreBreakdown::default()
            };
        }

        let daylight = match (self.config.daylight_adjustment, sample.is_day) {
            (false, _) => 0,
            (true, true) => 2,
            (true, false) => -1,
        };

        ScoreBreakdown {
            rain_override: false,
            daylight,
            humidity: humidity_points(sample.relative_humidity),
            temperature: temperature_points(sample.temperature),
            wind: wind_points(sample.wind_speed),
            cloud: self.config.cloud_scheme.points(sample.cloud_cover),
        }
    }
}

fn humidity_points(humidity: f64) -> i32 {
    if humidity < 60.0 {
        3
    } else if humidity > 60.0 && humidity <= 80.0 {
        2
    } else {
        0
    }
}

// Exactly 20 and exactly 25 match none of the bands.
#[allow(clippy::if_same_then_else)]
fn temperature_points(temperature: f64) -> i32 {
    if temperature > 25.0 && temperature < 35.0 {
        3
    } else if temperature > 20.0 && temperature < 25.0 {
        3
    } else if temperature < 20.0 || temperature > 25.0 {
        1
    } else {
        0
    }
}

fn wind_points(wind_speed: f64) -> i32 {
    if wind_speed > 5.0 && wind_speed < 20.0 {
        2
    } else if wind_speed > 30.0 {
        1
    } else {
        0
    }
}
