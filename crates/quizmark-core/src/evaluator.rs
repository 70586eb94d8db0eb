//! Answer evaluation: turns one submission into a metrics record.
//!
//! Metrics are computed at full precision and rounded only when the record
//! is assembled, so rounding never feeds back into later steps.

use crate::config::{DifficultyWeights, EvaluatorWeights, ScoringConfig};
use crate::constants::FALLBACK_EXPECTED_TIME;
use crate::difficulty::ResolvedDifficulty;
use crate::model::{AnswerSubmission, EvaluationRecord, Metrics, Notes, Pacing};
use crate::numeric::{clamp_unit, round_to};
use crate::text::{normalize_text, similarity};

/// Decimal places for every reported metric and time field.
const METRIC_PLACES: usize = 3;

/// Scores submissions against a fixed set of weights.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    difficulty: DifficultyWeights,
    weights: EvaluatorWeights,
}

impl Evaluator {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            difficulty: config.difficulty.clone(),
            weights: config.evaluator.clone(),
        }
    }

    /// Evaluate one submission. Never fails: bad inputs are normalized.
    pub fn evaluate(&self, submission: &AnswerSubmission) -> EvaluationRecord {
        let difficulty = ResolvedDifficulty::resolve(&submission.difficulty, &self.difficulty);

        let is_correct = normalize_text(&submission.correct_answer)
            == normalize_text(&submission.student_answer);
        let text_similarity = similarity(&submission.correct_answer, &submission.student_answer);
        let normalized_accuracy = if is_correct { 1.0 } else { text_similarity };

        let time_taken = sanitize_time_taken(submission.time_taken_seconds);
        let expected_time = sanitize_expected_time(submission.expected_time_seconds);
        let time_ratio = time_ratio(time_taken, expected_time);

        let speed_score = self.speed_score(time_ratio);
        let timing_alignment = self.timing_alignment(time_ratio);
        let confidence = self.confidence(normalized_accuracy, speed_score, timing_alignment);
        let pacing = self.pacing(time_ratio);

        tracing::debug!(
            is_correct,
            text_similarity,
            time_ratio,
            speed_score,
            timing_alignment,
            confidence,
            %pacing,
            "evaluated answer"
        );

        EvaluationRecord {
            question: submission.question.clone(),
            position: submission.position.clone(),
            difficulty: difficulty.label,
            correct_answer: submission.correct_answer.clone(),
            student_answer: submission.student_answer.clone(),
            time_taken_seconds: round_to(time_taken, METRIC_PLACES),
            expected_time_seconds: round_to(expected_time, METRIC_PLACES),
            metrics: Metrics {
                is_correct,
                text_similarity: round_to(text_similarity, METRIC_PLACES),
                normalized_accuracy: round_to(normalized_accuracy, METRIC_PLACES),
                time_ratio: round_to(time_ratio, METRIC_PLACES),
                speed_score: round_to(speed_score, METRIC_PLACES),
                timing_alignment: round_to(timing_alignment, METRIC_PLACES),
                difficulty_weight: round_to(difficulty.weight, METRIC_PLACES),
                confidence: round_to(confidence, METRIC_PLACES),
            },
            notes: Notes { pacing },
        }
    }

    /// Piecewise speed score: a gentle slope for finishing early, a steep one
    /// for running over.
    pub fn speed_score(&self, time_ratio: f64) -> f64 {
        let score = if time_ratio <= 1.0 {
            1.0 - (1.0 - time_ratio) * self.weights.fast_penalty_slope
        } else {
            1.0 - (time_ratio - 1.0) * self.weights.slow_penalty_slope
        };
        clamp_unit(score)
    }

    /// Closeness to the expected time, regardless of direction.
    pub fn timing_alignment(&self, time_ratio: f64) -> f64 {
        clamp_unit(1.0 - (time_ratio - 1.0).abs() * self.weights.alignment_slope)
    }

    pub fn confidence(&self, accuracy: f64, speed_score: f64, timing_alignment: f64) -> f64 {
        let w = &self.weights;
        clamp_unit(
            w.accuracy_weight * accuracy
                + w.speed_weight * speed_score
                + w.alignment_weight * timing_alignment,
        )
    }

    pub fn pacing(&self, time_ratio: f64) -> Pacing {
        if time_ratio < self.weights.fast_threshold {
            Pacing::Fast
        } else if time_ratio > self.weights.slow_threshold {
            Pacing::Slow
        } else {
            Pacing::OnTime
        }
    }
}

/// Evaluate with the default weights.
pub fn evaluate(
    question: &str,
    correct_answer: &str,
    student_answer: &str,
    time_taken: f64,
    expected_time: f64,
    difficulty: &str,
    position: &str,
) -> EvaluationRecord {
    let submission = AnswerSubmission::new(question, correct_answer, student_answer)
        .timing(time_taken, expected_time)
        .difficulty(difficulty)
        .position(position);
    Evaluator::default().evaluate(&submission)
}

fn sanitize_time_taken(time_taken: f64) -> f64 {
    if time_taken.is_finite() && time_taken >= 0.0 {
        time_taken
    } else {
        tracing::warn!(time_taken, "time taken is negative or not a number, using 0");
        0.0
    }
}

fn sanitize_expected_time(expected_time: f64) -> f64 {
    if expected_time.is_finite() && expected_time > 0.0 {
        expected_time
    } else {
        tracing::warn!(
            expected_time,
            fallback = FALLBACK_EXPECTED_TIME,
            "expected time is not positive, substituting fallback"
        );
        FALLBACK_EXPECTED_TIME
    }
}

fn time_ratio(time_taken: f64, expected_time: f64) -> f64 {
    let ratio = time_taken / expected_time;
    // A tiny expected time can overflow; keep the record serializable.
    if ratio.is_finite() {
        ratio
    } else {
        f64::MAX
    }
}
