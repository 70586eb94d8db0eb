//! quizmark-core — Answer evaluation and mastery scoring.
//!
//! This crate defines the record types, the text similarity measure, and the
//! two scoring stages: the [`evaluator`] turns one answer submission into a
//! metrics record, and the [`mastery`] scorer turns that record into a 0–100
//! mastery score.

pub mod config;
pub mod constants;
pub mod difficulty;
pub mod error;
pub mod evaluator;
pub mod io;
pub mod mastery;
pub mod model;
pub mod numeric;
pub mod text;

pub use config::{load_config, load_config_from, ScoringConfig};
pub use error::{ConfigError, RecordError};
pub use evaluator::{evaluate, Evaluator};
pub use mastery::{score, MasteryInputs, MasteryScorer};
pub use model::{AnswerSubmission, EvaluationRecord, MasteryResult, Pacing};
