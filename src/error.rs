// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read input {path}: {source}")]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed document: {0}")]
    Parse(String),

    #[error("Generation request failed: {0}")]
    Generation(String),

    #[error("Failed to write output {path}: {message}")]
    OutputWrite { path: PathBuf, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PipelineError {
    pub fn output_write(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::OutputWrite {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
