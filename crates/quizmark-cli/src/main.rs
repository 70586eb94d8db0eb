//! quizmark CLI — evaluate a quiz answer and score mastery.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::{OutputArgs, SubmissionArgs};
use quizmark_core::RecordError;

mod commands;

#[derive(Parser)]
#[command(
    name = "quizmark",
    version,
    about = "Quiz answer evaluation and mastery scoring"
)]
struct Cli {
    /// Scoring config file (default: ./quizmark.toml, then ~/.config/quizmark/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a student answer and emit performance metrics
    Evaluate {
        #[command(flatten)]
        submission: SubmissionArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Compute a 0-100 mastery score from an evaluation record
    Mastery {
        /// Evaluation JSON produced by `quizmark evaluate` ('-' for stdin)
        #[arg(long)]
        input: String,

        /// Output format: json, table
        #[arg(long, default_value = "json", value_parser = ["json", "table"])]
        format: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Evaluate an answer and score mastery in one step
    Pipeline {
        #[command(flatten)]
        submission: SubmissionArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Create a starter quizmark.toml
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizmark=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Evaluate { submission, output } => {
            commands::evaluate::execute(submission, output, config)
        }
        Commands::Mastery {
            input,
            format,
            output,
        } => commands::mastery::execute(input, format, output, config),
        Commands::Pipeline { submission, output } => {
            commands::pipeline::execute(submission, output, config)
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        // Unreadable input or unwritable output gets its own exit status so
        // callers never mistake it for a scoring result.
        let io_failure = e.chain().any(|cause| cause.is::<RecordError>());
        process::exit(if io_failure { 2 } else { 1 });
    }
}
