//! Error types for the I/O edges of quizmark.
//!
//! Scoring itself never fails. These errors come from reading input records,
//! writing results, and loading configuration, so callers can tell an
//! unreadable input apart from a genuinely low score.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reading or writing JSON records.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The input file or stream could not be read.
    #[error("failed to read input from {origin}: {source}")]
    Read {
        origin: String,
        #[source]
        source: io::Error,
    },

    /// The input was read but is not a valid record.
    #[error("failed to parse JSON record from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// The input parsed as JSON but is not an object.
    #[error("expected a JSON object in {origin}, found {found}")]
    NotAnObject { origin: String, found: &'static str },

    /// A result could not be turned into JSON.
    #[error("failed to serialize record: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The output destination could not be written.
    #[error("failed to write output to {destination}: {source}")]
    Write {
        destination: String,
        #[source]
        source: io::Error,
    },
}

impl RecordError {
    /// Returns `true` if the failure happened while consuming input.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            RecordError::Read { .. } | RecordError::Parse { .. } | RecordError::NotAnObject { .. }
        )
    }
}

/// Failures loading or validating a scoring configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A weight or threshold has an unusable value.
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}
