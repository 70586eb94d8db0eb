//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// A `quizmark` command isolated from any config on the host.
fn quizmark(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quizmark").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("QUIZMARK_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(assert: assert_cmd::assert::Assert) -> Value {
    let stdout = assert.get_output().stdout.clone();
    serde_json::from_slice(&stdout).expect("stdout should be JSON")
}

fn paris_args() -> [&'static str; 11] {
    [
        "evaluate",
        "--correct-answer",
        "Paris",
        "--student-answer",
        "paris",
        "--time-taken",
        "10",
        "--expected-time",
        "10",
        "--difficulty",
        "easy",
    ]
}

#[test]
fn evaluate_exact_match() {
    let dir = TempDir::new().unwrap();
    let record = stdout_json(quizmark(&dir).args(paris_args()).assert().success());

    let m = &record["metrics"];
    assert_eq!(m["is_correct"], true);
    assert_eq!(m["normalized_accuracy"], 1.0);
    assert_eq!(m["time_ratio"], 1.0);
    assert_eq!(m["speed_score"], 1.0);
    assert_eq!(m["timing_alignment"], 1.0);
    assert_eq!(m["difficulty_weight"], 0.9);
    assert_eq!(m["confidence"], 1.0);
    assert_eq!(record["notes"]["pacing"], "on_time");
    assert_eq!(record["difficulty"], "easy");
}

#[test]
fn evaluate_defaults_to_sample_answer() {
    let dir = TempDir::new().unwrap();
    let record = stdout_json(quizmark(&dir).arg("evaluate").assert().success());

    assert_eq!(record["position"], "course/Real Python Pocket Reference");
    assert_eq!(record["metrics"]["is_correct"], false);
    assert_eq!(record["metrics"]["text_similarity"], 0.489);
    assert_eq!(record["metrics"]["time_ratio"], 0.9);
    assert_eq!(record["metrics"]["confidence"], 0.678);
}

#[test]
fn evaluate_absorbs_extreme_timing() {
    let dir = TempDir::new().unwrap();
    let record = stdout_json(
        quizmark(&dir)
            .args(["evaluate", "--time-taken", "10000", "--expected-time", "-5"])
            .assert()
            .success(),
    );

    assert_eq!(record["expected_time_seconds"], 1.0);
    assert_eq!(record["metrics"]["time_ratio"], 10000.0);
    assert_eq!(record["metrics"]["speed_score"], 0.0);
    assert_eq!(record["metrics"]["timing_alignment"], 0.0);
    assert_eq!(record["notes"]["pacing"], "slow");
}

#[test]
fn evaluate_unknown_difficulty_keeps_label() {
    let dir = TempDir::new().unwrap();
    let record = stdout_json(
        quizmark(&dir)
            .args(["evaluate", "--difficulty", "  Legendary "])
            .assert()
            .success(),
    );

    assert_eq!(record["difficulty"], "legendary");
    assert_eq!(record["metrics"]["difficulty_weight"], 1.0);
}

#[test]
fn evaluate_reads_submission_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("submission.json"),
        r#"{
            "question": "Largest planet?",
            "correct_answer": "Jupiter",
            "student_answer": "jupiter",
            "time_taken_seconds": 30,
            "expected_time_seconds": 20,
            "difficulty": "hard",
            "position": "science/astronomy"
        }"#,
    )
    .unwrap();

    let record = stdout_json(
        quizmark(&dir)
            .args(["evaluate", "--input", "submission.json"])
            .assert()
            .success(),
    );

    assert_eq!(record["question"], "Largest planet?");
    assert_eq!(record["metrics"]["is_correct"], true);
    assert_eq!(record["metrics"]["time_ratio"], 1.5);
    assert_eq!(record["metrics"]["difficulty_weight"], 1.15);
    assert_eq!(record["notes"]["pacing"], "slow");
}

#[test]
fn evaluate_input_conflicts_with_answer_flags() {
    let dir = TempDir::new().unwrap();
    quizmark(&dir)
        .args(["evaluate", "--input", "submission.json", "--question", "q"])
        .assert()
        .failure();
}

#[test]
fn evaluate_then_mastery_through_file() {
    let dir = TempDir::new().unwrap();

    quizmark(&dir)
        .args(paris_args())
        .args(["--output", "out/eval.json"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(dir.path().join("out/eval.json").exists());

    let mastery = stdout_json(
        quizmark(&dir)
            .args(["mastery", "--input", "out/eval.json"])
            .assert()
            .success(),
    );

    assert_eq!(mastery["mastery_score"], 93.0);
    let c = &mastery["components"];
    assert_eq!(c["base_score"], 100.0);
    assert_eq!(c["difficulty_adjusted"], 90.0);
    assert_eq!(c["correctness_bonus"], 3.0);
    assert_eq!(c["pacing_penalty"], 0.0);
}

#[test]
fn mastery_reads_stdin() {
    let dir = TempDir::new().unwrap();
    let evaluation = quizmark(&dir)
        .args([
            "evaluate",
            "--correct-answer",
            "photosynthesis",
            "--student-answer",
            "photosynthesys",
            "--time-taken",
            "40",
            "--expected-time",
            "20",
            "--difficulty",
            "hard",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let mastery = stdout_json(
        quizmark(&dir)
            .args(["mastery", "--input", "-"])
            .write_stdin(evaluation)
            .assert()
            .success(),
    );

    assert_eq!(mastery["components"]["pacing_penalty"], 9.0);
    assert_eq!(mastery["components"]["speed_score"], 0.3);
    assert_eq!(mastery["mastery_score"], 75.7);
}

#[test]
fn mastery_tolerates_sparse_records() {
    let dir = TempDir::new().unwrap();
    let mastery = stdout_json(
        quizmark(&dir)
            .args(["mastery", "--input", "-"])
            .write_stdin(r#"{"metrics": {"normalized_accuracy": "0.5", "time_ratio": null}}"#)
            .assert()
            .success(),
    );

    assert_eq!(mastery["components"]["difficulty_weight"], 1.0);
    assert_eq!(mastery["components"]["time_ratio"], 1.0);
    assert_eq!(mastery["mastery_score"], 30.0);
}

#[test]
fn mastery_missing_input_is_io_error() {
    let dir = TempDir::new().unwrap();
    quizmark(&dir)
        .args(["mastery", "--input", "no_such_file.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("no_such_file.json"));
}

#[test]
fn mastery_malformed_input_is_io_error() {
    let dir = TempDir::new().unwrap();
    quizmark(&dir)
        .args(["mastery", "--input", "-"])
        .write_stdin("{ this is not json")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
}

#[test]
fn mastery_rejects_non_object_record() {
    let dir = TempDir::new().unwrap();
    quizmark(&dir)
        .args(["mastery", "--input", "-"])
        .write_stdin("[0.5, 1.0]")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected a JSON object"));
}

#[test]
fn mastery_table_format() {
    let dir = TempDir::new().unwrap();
    let evaluation = quizmark(&dir)
        .args(paris_args())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    quizmark(&dir)
        .args(["mastery", "--input", "-", "--format", "table"])
        .write_stdin(evaluation)
        .assert()
        .success()
        .stdout(predicate::str::contains("Difficulty adjusted"))
        .stdout(predicate::str::contains("Mastery score: 93.0 / 100 (easy)"));
}

#[test]
fn mastery_unknown_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    quizmark(&dir)
        .args(["mastery", "--input", "-", "--format", "xml"])
        .assert()
        .failure();
}

#[test]
fn unwritable_output_is_io_error() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("taken")).unwrap();
    quizmark(&dir)
        .args(["evaluate", "--output", "taken"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to write"));
}

#[test]
fn pipeline_emits_both_stages() {
    let dir = TempDir::new().unwrap();
    let out = stdout_json(
        quizmark(&dir)
            .args(["pipeline", "--difficulty", "very_hard"])
            .assert()
            .success(),
    );

    let evaluation = &out["evaluation"];
    let mastery = &out["mastery"];
    assert_eq!(evaluation["difficulty"], "very_hard");
    assert_eq!(mastery["difficulty"], "very_hard");
    assert_eq!(mastery["components"]["difficulty_weight"], 1.3);
    for key in ["normalized_accuracy", "speed_score", "confidence", "time_ratio"] {
        assert_eq!(
            mastery["components"][key], evaluation["metrics"][key],
            "{key} should carry over"
        );
    }
    let score = mastery["mastery_score"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&score));
}

#[test]
fn indent_is_configurable() {
    let dir = TempDir::new().unwrap();
    quizmark(&dir)
        .args(["evaluate", "--indent", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n    \"question\""))
        .stdout(predicate::str::contains("\n        \"is_correct\""));
}

#[test]
fn local_config_overrides_weights() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("quizmark.toml"),
        "[difficulty]\neasy = 0.5\n\n[mastery]\ncorrectness_bonus = 0.0\n",
    )
    .unwrap();

    let out = stdout_json(
        quizmark(&dir)
            .args(["pipeline", "--correct-answer", "Paris", "--student-answer", "paris"])
            .args(["--time-taken", "10", "--expected-time", "10", "--difficulty", "easy"])
            .assert()
            .success(),
    );
    assert_eq!(out["evaluation"]["metrics"]["difficulty_weight"], 0.5);
    assert_eq!(out["mastery"]["components"]["correctness_bonus"], 0.0);
    assert_eq!(out["mastery"]["mastery_score"], 50.0);
}

#[test]
fn config_from_env_var() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("elsewhere.toml");
    std::fs::write(&path, "[difficulty]\nmedium = 1.05\n").unwrap();

    let record = stdout_json(
        quizmark(&dir)
            .env("QUIZMARK_CONFIG", &path)
            .arg("evaluate")
            .assert()
            .success(),
    );
    assert_eq!(record["metrics"]["difficulty_weight"], 1.05);
}

#[test]
fn missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    quizmark(&dir)
        .args(["evaluate", "--config", "nope.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("quizmark.toml"), "[difficulty]\nhard = -2\n").unwrap();

    quizmark(&dir)
        .arg("evaluate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("difficulty.hard"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    quizmark(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizmark.toml"));

    assert!(dir.path().join("quizmark.toml").exists());

    // The generated file must load cleanly.
    quizmark(&dir).arg("evaluate").assert().success();
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizmark(&dir).arg("init").assert().success();

    quizmark(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    quizmark(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz answer evaluation and mastery scoring"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    quizmark(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizmark"));
}
