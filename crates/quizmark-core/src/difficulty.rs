//! Question difficulty levels and their resolution from free-text labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::DifficultyWeights;
use crate::constants::DEFAULT_DIFFICULTY;
use crate::text::normalize_text;

/// Known difficulty levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    VeryHard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::VeryHard => write!(f, "very_hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_text(s).as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "very_hard" => Ok(Difficulty::VeryHard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A difficulty label after normalization, with the weight it maps to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDifficulty {
    /// Normalized label as it will be echoed in records. Unknown labels are
    /// kept verbatim.
    pub label: String,
    /// The matched level, or `None` for an unknown label.
    pub level: Option<Difficulty>,
    /// Multiplier applied by the mastery scorer.
    pub weight: f64,
}

impl ResolvedDifficulty {
    /// Resolve a raw label against `weights`.
    ///
    /// A blank label resolves to `medium`. An unknown label keeps its
    /// normalized text but takes medium's weight.
    pub fn resolve(raw: &str, weights: &DifficultyWeights) -> Self {
        let mut label = normalize_text(raw);
        if label.is_empty() {
            label = DEFAULT_DIFFICULTY.to_string();
        }

        match label.parse::<Difficulty>() {
            Ok(level) => Self {
                weight: weights.weight_for(level),
                level: Some(level),
                label,
            },
            Err(_) => {
                tracing::warn!(difficulty = %label, "unknown difficulty, using medium weight");
                Self {
                    weight: weights.weight_for(Difficulty::Medium),
                    level: None,
                    label,
                }
            }
        }
    }

    /// Returns `true` if the label matched a known level.
    pub fn is_known(&self) -> bool {
        self.level.is_some()
    }
}
