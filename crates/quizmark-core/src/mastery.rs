//! Mastery scoring: turns an evaluation record into a 0–100 score.
//!
//! The scorer accepts records it did not produce (hand-edited files, other
//! tools), so every field is read through [`MasteryInputs`], which validates
//! and defaults each value before any arithmetic happens.

use serde_json::{Map, Value};

use crate::config::{MasteryWeights, ScoringConfig};
use crate::constants::MAX_MASTERY_SCORE;
use crate::model::{EvaluationRecord, MasteryComponents, MasteryResult};
use crate::numeric::{clamp, clamp_unit, round_to};

/// Validated inputs to the mastery score.
#[derive(Debug, Clone, PartialEq)]
pub struct MasteryInputs {
    pub question: String,
    pub position: String,
    pub difficulty: String,
    /// In `[0, 1]`.
    pub normalized_accuracy: f64,
    /// In `[0, 1]`.
    pub speed_score: f64,
    /// In `[0, 1]`.
    pub confidence: f64,
    /// Positive.
    pub difficulty_weight: f64,
    /// Non-negative.
    pub time_ratio: f64,
    pub is_correct: bool,
}

impl Default for MasteryInputs {
    fn default() -> Self {
        Self {
            question: String::new(),
            position: String::new(),
            difficulty: String::new(),
            normalized_accuracy: 0.0,
            speed_score: 0.0,
            confidence: 0.0,
            difficulty_weight: 1.0,
            time_ratio: 1.0,
            is_correct: false,
        }
    }
}

impl MasteryInputs {
    /// Read inputs from an arbitrary JSON document shaped like an
    /// [`EvaluationRecord`].
    ///
    /// Missing or null fields take their defaults: `0.0` for the unit
    /// metrics, `1.0` for `difficulty_weight` and `time_ratio`, `false` for
    /// `is_correct`. Numeric strings and booleans are accepted as numbers.
    /// Anything else unusable falls back to the default with a warning.
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        let empty = Map::new();
        let metrics = match value.get("metrics") {
            Some(Value::Object(map)) => map,
            Some(Value::Null) | None => &empty,
            Some(other) => {
                tracing::warn!(metrics = %other, "metrics is not an object, using defaults");
                &empty
            }
        };

        Self {
            question: read_text(value, "question"),
            position: read_text(value, "position"),
            difficulty: read_text(value, "difficulty"),
            normalized_accuracy: read_unit(metrics, "normalized_accuracy"),
            speed_score: read_unit(metrics, "speed_score"),
            confidence: read_unit(metrics, "confidence"),
            difficulty_weight: read_number(metrics, "difficulty_weight")
                .filter(|w| *w > 0.0)
                .unwrap_or(defaults.difficulty_weight),
            time_ratio: read_number(metrics, "time_ratio")
                .filter(|r| *r >= 0.0)
                .unwrap_or(defaults.time_ratio),
            is_correct: read_flag(metrics, "is_correct"),
        }
    }
}

impl From<&EvaluationRecord> for MasteryInputs {
    fn from(record: &EvaluationRecord) -> Self {
        let m = &record.metrics;
        Self {
            question: record.question.clone(),
            position: record.position.clone(),
            difficulty: record.difficulty.clone(),
            normalized_accuracy: clamp_unit(m.normalized_accuracy),
            speed_score: clamp_unit(m.speed_score),
            confidence: clamp_unit(m.confidence),
            difficulty_weight: if m.difficulty_weight.is_finite() && m.difficulty_weight > 0.0 {
                m.difficulty_weight
            } else {
                1.0
            },
            time_ratio: if m.time_ratio.is_finite() && m.time_ratio >= 0.0 {
                m.time_ratio
            } else {
                1.0
            },
            is_correct: m.is_correct,
        }
    }
}

/// Computes mastery scores with a fixed set of weights.
#[derive(Debug, Clone, Default)]
pub struct MasteryScorer {
    weights: MasteryWeights,
}

impl MasteryScorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            weights: config.mastery.clone(),
        }
    }

    /// Score validated inputs.
    pub fn score(&self, inputs: &MasteryInputs) -> MasteryResult {
        let w = &self.weights;

        let base_score = (w.accuracy_weight * inputs.normalized_accuracy
            + w.speed_weight * inputs.speed_score
            + w.confidence_weight * inputs.confidence)
            * 100.0;
        let difficulty_adjusted = cap(base_score * inputs.difficulty_weight);
        let correctness_bonus = if inputs.is_correct {
            w.correctness_bonus
        } else {
            0.0
        };
        let pacing_penalty = self.pacing_penalty(inputs.time_ratio);
        let mastery_score = clamp(
            difficulty_adjusted + correctness_bonus - pacing_penalty,
            0.0,
            MAX_MASTERY_SCORE,
        );

        tracing::debug!(
            base_score,
            difficulty_adjusted,
            correctness_bonus,
            pacing_penalty,
            mastery_score,
            "scored mastery"
        );

        MasteryResult {
            question: inputs.question.clone(),
            position: inputs.position.clone(),
            difficulty: inputs.difficulty.clone(),
            mastery_score: round_to(mastery_score, 1),
            components: MasteryComponents {
                base_score: round_to(base_score, 2),
                difficulty_weight: round_to(inputs.difficulty_weight, 3),
                difficulty_adjusted: round_to(difficulty_adjusted, 2),
                correctness_bonus: round_to(correctness_bonus, 2),
                pacing_penalty: round_to(pacing_penalty, 2),
                normalized_accuracy: round_to(inputs.normalized_accuracy, 3),
                speed_score: round_to(inputs.speed_score, 3),
                confidence: round_to(inputs.confidence, 3),
                time_ratio: round_to(inputs.time_ratio, 3),
            },
        }
    }

    /// Score an untrusted JSON document.
    pub fn score_value(&self, value: &Value) -> MasteryResult {
        self.score(&MasteryInputs::from_value(value))
    }

    /// Score a record straight from the evaluator.
    pub fn score_record(&self, record: &EvaluationRecord) -> MasteryResult {
        self.score(&MasteryInputs::from(record))
    }

    /// Zero up to the threshold, then linear in the overrun. Saturates at
    /// `f64::MAX` instead of overflowing.
    pub fn pacing_penalty(&self, time_ratio: f64) -> f64 {
        if time_ratio > self.weights.penalty_threshold {
            cap((time_ratio - self.weights.penalty_threshold) * self.weights.penalty_slope)
        } else {
            0.0
        }
    }
}

/// Score a JSON evaluation record with the default weights.
pub fn score(evaluation: &Value) -> MasteryResult {
    MasteryScorer::default().score_value(evaluation)
}

/// Keep extreme components serializable as JSON numbers.
fn cap(value: f64) -> f64 {
    value.min(f64::MAX)
}

fn read_text(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// A finite number, or `None` when the field is missing, null or unusable.
fn read_number(metrics: &Map<String, Value>, key: &str) -> Option<f64> {
    let parsed = match metrics.get(key)? {
        Value::Null => return None,
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Array(_) | Value::Object(_) => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Some(v),
        _ => {
            tracing::warn!(field = key, "malformed metric, using default");
            None
        }
    }
}

fn read_unit(metrics: &Map<String, Value>, key: &str) -> f64 {
    read_number(metrics, key).map(clamp_unit).unwrap_or(0.0)
}

fn read_flag(metrics: &Map<String, Value>, key: &str) -> bool {
    match metrics.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "1"
        ),
        _ => false,
    }
}
