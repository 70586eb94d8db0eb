//! The `quizmark evaluate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizmark_core::io;
use quizmark_core::Evaluator;

use super::{OutputArgs, SubmissionArgs};

pub fn execute(
    submission: SubmissionArgs,
    output: OutputArgs,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::load_config(config_path.as_deref())?;
    let submission = submission.into_submission()?;

    let record = Evaluator::new(&config).evaluate(&submission);

    io::write_json(&record, output.indent, output.destination())
        .context("failed to write evaluation")?;
    if let Some(path) = output.destination() {
        tracing::info!(path = %path.display(), "evaluation written");
    }

    Ok(())
}
