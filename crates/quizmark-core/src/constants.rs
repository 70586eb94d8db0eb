//! Default weights and thresholds for both scoring stages.
//!
//! These are the values the configuration falls back to when a field is not
//! set. The sample config written by `quizmark init` must match them.

// Difficulty multipliers.
pub const EASY_WEIGHT: f64 = 0.9;
pub const MEDIUM_WEIGHT: f64 = 1.0;
pub const HARD_WEIGHT: f64 = 1.15;
pub const VERY_HARD_WEIGHT: f64 = 1.3;

/// Label recorded when no difficulty is given.
pub const DEFAULT_DIFFICULTY: &str = "medium";

// Evaluator timing curves.
pub const FAST_PENALTY_SLOPE: f64 = 0.25;
pub const SLOW_PENALTY_SLOPE: f64 = 0.7;
pub const ALIGNMENT_SLOPE: f64 = 0.6;

/// Expected time substituted when the supplied one is zero or negative.
pub const FALLBACK_EXPECTED_TIME: f64 = 1.0;

// Confidence blend.
pub const CONFIDENCE_ACCURACY_WEIGHT: f64 = 0.6;
pub const CONFIDENCE_SPEED_WEIGHT: f64 = 0.25;
pub const CONFIDENCE_ALIGNMENT_WEIGHT: f64 = 0.15;

// Pacing tag boundaries on the time ratio.
pub const FAST_PACING_THRESHOLD: f64 = 0.8;
pub const SLOW_PACING_THRESHOLD: f64 = 1.2;

// Mastery base blend.
pub const MASTERY_ACCURACY_WEIGHT: f64 = 0.6;
pub const MASTERY_SPEED_WEIGHT: f64 = 0.25;
pub const MASTERY_CONFIDENCE_WEIGHT: f64 = 0.15;

/// Flat bonus added to the mastery score for an exact match.
pub const CORRECTNESS_BONUS: f64 = 3.0;

/// Time ratio above which the mastery score is penalized.
pub const PACING_PENALTY_THRESHOLD: f64 = 1.4;
/// Points deducted per unit of time ratio above the threshold.
pub const PACING_PENALTY_SLOPE: f64 = 15.0;

/// Upper bound of the mastery scale.
pub const MAX_MASTERY_SCORE: f64 = 100.0;

/// Second-sequence length at which the similarity matcher starts ignoring
/// very frequent characters when seeding matches.
pub const AUTOJUNK_MIN_LEN: usize = 200;
