//! The `quizmark init` command.

use std::path::Path;

use anyhow::{Context, Result};

use quizmark_core::config::LOCAL_CONFIG_FILE;

pub fn execute() -> Result<()> {
    let path = Path::new(LOCAL_CONFIG_FILE);
    if path.exists() {
        println!("{LOCAL_CONFIG_FILE} already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG)
            .with_context(|| format!("failed to write {LOCAL_CONFIG_FILE}"))?;
        println!("Created {LOCAL_CONFIG_FILE}");
    }

    println!("\nNext steps:");
    println!("  1. Adjust weights in {LOCAL_CONFIG_FILE} (every key is optional)");
    println!("  2. Run: quizmark evaluate --correct-answer Paris --student-answer paris --output eval.json");
    println!("  3. Run: quizmark mastery --input eval.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizmark scoring configuration
# Every value below is the built-in default; delete what you don't change.

[difficulty]
easy = 0.9
medium = 1.0
hard = 1.15
very_hard = 1.3

[evaluator]
# Speed score lost per unit of time ratio below / above the expected time.
fast_penalty_slope = 0.25
slow_penalty_slope = 0.7
alignment_slope = 0.6
# Confidence blend.
accuracy_weight = 0.6
speed_weight = 0.25
alignment_weight = 0.15
# Pacing tags: ratio < fast_threshold is "fast", > slow_threshold is "slow".
fast_threshold = 0.8
slow_threshold = 1.2

[mastery]
accuracy_weight = 0.6
speed_weight = 0.25
confidence_weight = 0.15
correctness_bonus = 3.0
penalty_threshold = 1.4
penalty_slope = 15.0
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use quizmark_core::ScoringConfig;

    #[test]
    fn sample_config_is_the_default() {
        let config =
            ScoringConfig::from_toml_str(SAMPLE_CONFIG, Path::new(LOCAL_CONFIG_FILE)).unwrap();
        assert_eq!(config, ScoringConfig::default());
    }
}
