//! Laundry drying heuristic.
//!
//! Scores each forecast hour for outdoor drying and buckets the horizon into
//! best, neutral and poor hours.

pub mod classifier;
pub mod scorer;

pub use classifier::{classify, Classification, Classifier, DryingTier, ScoreResult};
pub use drycast_weather::InputShapeError;
pub use scorer::{CloudScheme, DryingScorer, HeuristicPreset, ScoreBreakdown, ScorerConfig};
