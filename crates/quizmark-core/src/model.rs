//! Record types exchanged between the scoring stages.
//!
//! Field names are snake_case on the wire. An [`EvaluationRecord`] written by
//! the evaluator is exactly the document the mastery scorer reads.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DIFFICULTY;

/// One answer to one question, as submitted for evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub correct_answer: String,
    #[serde(default)]
    pub student_answer: String,
    /// Seconds the student spent on the question.
    #[serde(default, alias = "time_taken")]
    pub time_taken_seconds: f64,
    /// Target time for the question. Zero or negative means "unknown".
    #[serde(default, alias = "expected_time")]
    pub expected_time_seconds: f64,
    /// Free-text difficulty label, e.g. `"hard"`.
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    /// Where the question sits in the course, e.g. `course/module/concept`.
    #[serde(default)]
    pub position: String,
}

fn default_difficulty() -> String {
    DEFAULT_DIFFICULTY.to_string()
}

impl AnswerSubmission {
    pub fn new(
        question: impl Into<String>,
        correct_answer: impl Into<String>,
        student_answer: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            correct_answer: correct_answer.into(),
            student_answer: student_answer.into(),
            time_taken_seconds: 0.0,
            expected_time_seconds: 0.0,
            difficulty: default_difficulty(),
            position: String::new(),
        }
    }

    /// Set the time taken and the expected time, in seconds.
    pub fn timing(mut self, time_taken: f64, expected_time: f64) -> Self {
        self.time_taken_seconds = time_taken;
        self.expected_time_seconds = expected_time;
        self
    }

    pub fn difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    pub fn position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }
}

/// Evaluator output: the submission echoed back with its metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub question: String,
    pub position: String,
    /// Normalized difficulty label (unknown labels are kept as given).
    pub difficulty: String,
    pub correct_answer: String,
    pub student_answer: String,
    pub time_taken_seconds: f64,
    /// The expected time actually used, after substituting for `<= 0`.
    pub expected_time_seconds: f64,
    pub metrics: Metrics,
    pub notes: Notes,
}

/// Per-answer performance metrics, rounded to 3 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub is_correct: bool,
    pub text_similarity: f64,
    pub normalized_accuracy: f64,
    pub time_ratio: f64,
    pub speed_score: f64,
    pub timing_alignment: f64,
    pub difficulty_weight: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notes {
    pub pacing: Pacing,
}

/// How the time taken compares to the expected time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pacing {
    Fast,
    OnTime,
    Slow,
}

impl fmt::Display for Pacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pacing::Fast => write!(f, "fast"),
            Pacing::OnTime => write!(f, "on_time"),
            Pacing::Slow => write!(f, "slow"),
        }
    }
}

/// Mastery scorer output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasteryResult {
    pub question: String,
    pub position: String,
    pub difficulty: String,
    /// Final score in `[0, 100]`, rounded to 1 decimal.
    pub mastery_score: f64,
    pub components: MasteryComponents,
}

/// How the mastery score was put together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasteryComponents {
    pub base_score: f64,
    pub difficulty_weight: f64,
    pub difficulty_adjusted: f64,
    pub correctness_bonus: f64,
    pub pacing_penalty: f64,
    pub normalized_accuracy: f64,
    pub speed_score: f64,
    pub confidence: f64,
    pub time_ratio: f64,
}
