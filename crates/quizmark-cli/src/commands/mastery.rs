//! The `quizmark mastery` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use quizmark_core::io;
use quizmark_core::model::MasteryResult;
use quizmark_core::MasteryScorer;

use super::OutputArgs;

pub fn execute(
    input: String,
    format: String,
    output: OutputArgs,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::load_config(config_path.as_deref())?;
    let evaluation = io::read_record(&input).context("failed to load evaluation record")?;

    let result = MasteryScorer::new(&config).score_value(&evaluation);

    let written = match format.as_str() {
        "table" => io::write_output(&render_table(&result), output.destination()),
        _ => io::write_json(&result, output.indent, output.destination()),
    };
    written.context("failed to write mastery result")?;

    if let Some(path) = output.destination() {
        tracing::info!(path = %path.display(), score = result.mastery_score, "mastery written");
    }

    Ok(())
}

fn render_table(result: &MasteryResult) -> String {
    let c = &result.components;
    let mut table = Table::new();
    table.set_header(vec!["Component", "Value"]);

    let rows = [
        ("Base score", c.base_score),
        ("Difficulty weight", c.difficulty_weight),
        ("Difficulty adjusted", c.difficulty_adjusted),
        ("Correctness bonus", c.correctness_bonus),
        ("Pacing penalty", c.pacing_penalty),
        ("Normalized accuracy", c.normalized_accuracy),
        ("Speed score", c.speed_score),
        ("Confidence", c.confidence),
        ("Time ratio", c.time_ratio),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }

    let difficulty = if result.difficulty.is_empty() {
        "unknown"
    } else {
        result.difficulty.as_str()
    };
    format!(
        "{table}\nMastery score: {:.1} / 100 ({difficulty})",
        result.mastery_score
    )
}
