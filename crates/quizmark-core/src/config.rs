//! Scoring configuration.
//!
//! Every weight and threshold used by the evaluator and the mastery scorer
//! lives here. Fields missing from a config file fall back to the defaults in
//! [`crate::constants`], so a file only needs to name what it overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::difficulty::Difficulty;
use crate::error::ConfigError;

/// Environment variable naming a config file to load.
pub const CONFIG_ENV_VAR: &str = "QUIZMARK_CONFIG";

/// File name searched for in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "quizmark.toml";

/// Top-level quizmark configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Multipliers per difficulty level.
    #[serde(default)]
    pub difficulty: DifficultyWeights,
    /// Timing curves, confidence blend and pacing thresholds.
    #[serde(default)]
    pub evaluator: EvaluatorWeights,
    /// Base blend, bonus and penalty for the mastery score.
    #[serde(default)]
    pub mastery: MasteryWeights,
}

/// Difficulty multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyWeights {
    pub easy: f64,
    pub medium: f64,
    pub hard: f64,
    pub very_hard: f64,
}

impl Default for DifficultyWeights {
    fn default() -> Self {
        Self {
            easy: EASY_WEIGHT,
            medium: MEDIUM_WEIGHT,
            hard: HARD_WEIGHT,
            very_hard: VERY_HARD_WEIGHT,
        }
    }
}

impl DifficultyWeights {
    pub fn weight_for(&self, level: Difficulty) -> f64 {
        match level {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::VeryHard => self.very_hard,
        }
    }
}

/// Parameters of the evaluator's timing curves and confidence blend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorWeights {
    /// Speed score lost per unit of time ratio below 1.0.
    pub fast_penalty_slope: f64,
    /// Speed score lost per unit of time ratio above 1.0.
    pub slow_penalty_slope: f64,
    /// Timing alignment lost per unit of distance from a 1.0 ratio.
    pub alignment_slope: f64,
    pub accuracy_weight: f64,
    pub speed_weight: f64,
    pub alignment_weight: f64,
    /// Ratios strictly below this are tagged `fast`.
    pub fast_threshold: f64,
    /// Ratios strictly above this are tagged `slow`.
    pub slow_threshold: f64,
}

impl Default for EvaluatorWeights {
    fn default() -> Self {
        Self {
            fast_penalty_slope: FAST_PENALTY_SLOPE,
            slow_penalty_slope: SLOW_PENALTY_SLOPE,
            alignment_slope: ALIGNMENT_SLOPE,
            accuracy_weight: CONFIDENCE_ACCURACY_WEIGHT,
            speed_weight: CONFIDENCE_SPEED_WEIGHT,
            alignment_weight: CONFIDENCE_ALIGNMENT_WEIGHT,
            fast_threshold: FAST_PACING_THRESHOLD,
            slow_threshold: SLOW_PACING_THRESHOLD,
        }
    }
}

/// Parameters of the mastery score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasteryWeights {
    pub accuracy_weight: f64,
    pub speed_weight: f64,
    pub confidence_weight: f64,
    /// Flat points added for an exact match.
    pub correctness_bonus: f64,
    /// Time ratio above which the pacing penalty applies.
    pub penalty_threshold: f64,
    /// Points deducted per unit of time ratio above the threshold.
    pub penalty_slope: f64,
}

impl Default for MasteryWeights {
    fn default() -> Self {
        Self {
            accuracy_weight: MASTERY_ACCURACY_WEIGHT,
            speed_weight: MASTERY_SPEED_WEIGHT,
            confidence_weight: MASTERY_CONFIDENCE_WEIGHT,
            correctness_bonus: CORRECTNESS_BONUS,
            penalty_threshold: PACING_PENALTY_THRESHOLD,
            penalty_slope: PACING_PENALTY_SLOPE,
        }
    }
}

impl ScoringConfig {
    /// Parse a TOML string and validate it.
    pub fn from_toml_str(content: &str, source_path: &Path) -> Result<Self, ConfigError> {
        let config: ScoringConfig =
            toml::from_str(content).map_err(|source| ConfigError::Parse {
                path: source_path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every weight is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.difficulty;
        let e = &self.evaluator;
        let m = &self.mastery;
        let fields = [
            ("difficulty.easy", d.easy),
            ("difficulty.medium", d.medium),
            ("difficulty.hard", d.hard),
            ("difficulty.very_hard", d.very_hard),
            ("evaluator.fast_penalty_slope", e.fast_penalty_slope),
            ("evaluator.slow_penalty_slope", e.slow_penalty_slope),
            ("evaluator.alignment_slope", e.alignment_slope),
            ("evaluator.accuracy_weight", e.accuracy_weight),
            ("evaluator.speed_weight", e.speed_weight),
            ("evaluator.alignment_weight", e.alignment_weight),
            ("evaluator.fast_threshold", e.fast_threshold),
            ("evaluator.slow_threshold", e.slow_threshold),
            ("mastery.accuracy_weight", m.accuracy_weight),
            ("mastery.speed_weight", m.speed_weight),
            ("mastery.confidence_weight", m.confidence_weight),
            ("mastery.correctness_bonus", m.correctness_bonus),
            ("mastery.penalty_threshold", m.penalty_threshold),
            ("mastery.penalty_slope", m.penalty_slope),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field: field.to_string(),
                    reason: format!("must be a finite, non-negative number (got {value})"),
                });
            }
        }

        // Difficulty weights must be strictly positive.
        let weights = [
            ("difficulty.easy", d.easy),
            ("difficulty.medium", d.medium),
            ("difficulty.hard", d.hard),
            ("difficulty.very_hard", d.very_hard),
        ];
        if let Some((field, _)) = weights.into_iter().find(|(_, w)| *w == 0.0) {
            return Err(ConfigError::Invalid {
                field: field.to_string(),
                reason: "difficulty weights must be greater than zero".to_string(),
            });
        }

        if e.fast_threshold > e.slow_threshold {
            return Err(ConfigError::Invalid {
                field: "evaluator.fast_threshold".to_string(),
                reason: format!(
                    "must not exceed evaluator.slow_threshold ({} > {})",
                    e.fast_threshold, e.slow_threshold
                ),
            });
        }

        Ok(())
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. the file named by `QUIZMARK_CONFIG`
/// 2. `quizmark.toml` in the current directory
/// 3. `~/.config/quizmark/config.toml`
///
/// Falls back to built-in defaults when none exists.
pub fn load_config() -> Result<ScoringConfig, ConfigError> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ScoringConfig, ConfigError> {
    let explicit = path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

    let config_path = if let Some(p) = explicit {
        if p.exists() {
            Some(p)
        } else {
            return Err(ConfigError::NotFound(p));
        }
    } else {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading scoring config");
            let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            ScoringConfig::from_toml_str(&content, &path)
        }
        None => Ok(ScoringConfig::default()),
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizmark"))
}
