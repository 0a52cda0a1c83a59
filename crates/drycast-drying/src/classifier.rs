use crate::scorer::DryingScorer;
use chrono::NaiveDateTime;
use drycast_weather::{ForecastSeries, InputShapeError};
use serde::{Deserialize, Serialize};

/// Lowest score of a best hour
pub const BEST_THRESHOLD: i32 = 8;

/// Lowest score of a neutral hour
pub const NEUTRAL_THRESHOLD: i32 = 5;

/// Drying suitability bucket for one hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DryingTier {
    Best,
    Neutral,
    Poor,
}

impl DryingTier {
    pub fn from_score(score: i32) -> Self {
        if score >= BEST_THRESHOLD {
            Self::Best
        } else if score >= NEUTRAL_THRESHOLD {
            Self::Neutral
        } else {
            Self::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::Neutral => "neutral",
            Self::Poor => "poor",
        }
    }
}

/// Score of one forecast hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub time: NaiveDateTime,
    pub score: i32,
}

/// Outcome of classifying a forecast series.
///
/// `best` and `neutral` keep the time order of the series. Poor hours are not
/// collected; [`Classification::poor`] derives them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Classification {
    pub times: Vec<NaiveDateTime>,
    pub scores: Vec<i32>,
    pub best: Vec<ScoreResult>,
    pub neutral: Vec<ScoreResult>,
}

impl Classification {
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn tier_at(&self, index: usize) -> Option<DryingTier> {
        self.scores.get(index).copied().map(DryingTier::from_score)
    }

    /// Hours present in `scores` but in neither list
    pub fn poor(&self) -> Vec<ScoreResult> {
        self.results()
            .filter(|r| DryingTier::from_score(r.score) == DryingTier::Poor)
            .collect()
    }

    /// Every hour with its score, in time order
    pub fn results(&self) -> impl Iterator<Item = ScoreResult> + '_ {
        self.times
            .iter()
            .zip(&self.scores)
            .map(|(&time, &score)| ScoreResult { time, score })
    }
}

/// Reusable classifier bound to one scorer configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    scorer: DryingScorer,
}

impl Classifier {
    pub fn new(scorer: DryingScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &DryingScorer {
        &self.scorer
    }

    /// See [`classify`].
    ///
    /// # Errors
    ///
    /// Returns `InputShapeError` when a column is misaligned with the time axis.
    pub fn classify(&self, series: &ForecastSeries) -> Result<Classification, InputShapeError> {
        classify(series, &self.scorer)
    }
}

/// Scores every hour of `series` and buckets the hours into best and neutral.
///
/// # Errors
///
/// Returns `InputShapeError` when a present column is not as long as the time
/// axis. Nothing is scored in that case.
pub fn classify(
    series: &ForecastSeries,
    scorer: &DryingScorer,
) -> Result<Classification, InputShapeError> {
    series.check_shape()?;

    let mut classification = Classification {
        times: Vec::with_capacity(series.len()),
        scores: Vec::with_capacity(series.len()),
        ..Classification::default()
    };

    for sample in series.samples() {
        let score = scorer.score(&sample);
        classification.times.push(sample.time);
        classification.scores.push(score);

        let result = ScoreResult {
            time: sample.time,
            score,
        };
        match DryingTier::from_score(score) {
            DryingTier::Best => classification.best.push(result),
            DryingTier::Neutral => classification.neutral.push(result),
            DryingTier::Poor => {}
        }
    }

    tracing::debug!(
        "Classified {} hours: {} best, {} neutral",
        classification.len(),
        classification.best.len(),
        classification.neutral.len()
    );

    Ok(classification)
}
