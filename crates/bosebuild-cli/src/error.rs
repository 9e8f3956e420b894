//! Error types for the `bbctl` tool.

use std::path::PathBuf;

use bosebuild_protocol::ProtocolError;
use thiserror::Error;

/// Errors that can occur while running a `bbctl` command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Frame could not be built or parsed.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input was not valid hex.
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Script file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Script file is not valid YAML for a command script.
    #[error("invalid script: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON output could not be produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Script entry failed to render.
    #[error("script entry {index}: {source}")]
    ScriptEntry {
        /// Zero-based entry index.
        index: usize,
        /// Underlying protocol error.
        source: ProtocolError,
    },
}
