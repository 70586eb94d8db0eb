//! The `quizmark pipeline` command: evaluate, then score, in one process.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use quizmark_core::io;
use quizmark_core::model::{EvaluationRecord, MasteryResult};
use quizmark_core::{Evaluator, MasteryScorer};

use super::{OutputArgs, SubmissionArgs};

/// Both stage outputs for one answer.
#[derive(Debug, Serialize)]
struct PipelineOutput {
    evaluation: EvaluationRecord,
    mastery: MasteryResult,
}

pub fn execute(
    submission: SubmissionArgs,
    output: OutputArgs,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::load_config(config_path.as_deref())?;
    let submission = submission.into_submission()?;

    let evaluation = Evaluator::new(&config).evaluate(&submission);
    let mastery = MasteryScorer::new(&config).score_record(&evaluation);

    let result = PipelineOutput {
        evaluation,
        mastery,
    };
    io::write_json(&result, output.indent, output.destination())
        .context("failed to write pipeline result")?;

    Ok(())
}
