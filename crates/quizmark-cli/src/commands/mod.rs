//! Subcommand implementations and their shared arguments.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use quizmark_core::io;
use quizmark_core::model::AnswerSubmission;
use quizmark_core::ScoringConfig;

pub mod evaluate;
pub mod init;
pub mod mastery;
pub mod pipeline;

const DEFAULT_QUESTION: &str = "What is the purpose of the `__name__` variable in Python?";
const DEFAULT_CORRECT_ANSWER: &str = "It is used to determine the current module name.";
const DEFAULT_STUDENT_ANSWER: &str =
    "It indicates whether the module is run directly or imported by exposing the module name";
const DEFAULT_POSITION: &str = "course/Real Python Pocket Reference";

/// The answer being evaluated, from flags or from a submission record.
#[derive(Debug, Args)]
pub struct SubmissionArgs {
    /// Answer submission JSON to evaluate ('-' for stdin) instead of the flags below
    #[arg(long)]
    pub input: Option<String>,

    /// The question text
    #[arg(long, default_value = DEFAULT_QUESTION, conflicts_with = "input")]
    pub question: String,

    /// Expected correct answer
    #[arg(long, default_value = DEFAULT_CORRECT_ANSWER, conflicts_with = "input")]
    pub correct_answer: String,

    /// The student's submitted answer
    #[arg(long, default_value = DEFAULT_STUDENT_ANSWER, conflicts_with = "input")]
    pub student_answer: String,

    /// Seconds the student took to answer
    #[arg(long, default_value_t = 18.0, allow_negative_numbers = true, conflicts_with = "input")]
    pub time_taken: f64,

    /// Target time for the question in seconds
    #[arg(long, default_value_t = 20.0, allow_negative_numbers = true, conflicts_with = "input")]
    pub expected_time: f64,

    /// Difficulty label: easy, medium, hard, very_hard
    #[arg(long, default_value = "medium", conflicts_with = "input")]
    pub difficulty: String,

    /// Question position in the course, e.g. course/module/concept
    #[arg(long, default_value = DEFAULT_POSITION, conflicts_with = "input")]
    pub position: String,
}

impl SubmissionArgs {
    pub fn into_submission(self) -> Result<AnswerSubmission> {
        if let Some(source) = &self.input {
            let submission = io::read_json::<AnswerSubmission>(source)
                .context("failed to load answer submission")?;
            return Ok(submission);
        }

        Ok(
            AnswerSubmission::new(self.question, self.correct_answer, self.student_answer)
                .timing(self.time_taken, self.expected_time)
                .difficulty(self.difficulty)
                .position(self.position),
        )
    }
}

/// Where and how to write the resulting JSON.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// File to write the result to (prints to stdout when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// JSON indentation for pretty output
    #[arg(long, default_value_t = 2)]
    pub indent: usize,
}

impl OutputArgs {
    pub fn destination(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

pub fn load_config(path: Option<&Path>) -> Result<ScoringConfig> {
    quizmark_core::load_config_from(path).context("failed to load scoring config")
}
