/*!
 * Error types for the clipsub application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by external collaborators (ffmpeg, whisperx, clip finder)
#[derive(Error, Debug)]
pub enum CollaboratorError {
    /// The external command could not be started
    #[error("Failed to launch {program}: {message}")]
    LaunchFailed {
        /// Program that was invoked
        program: String,
        /// Underlying OS error
        message: String,
    },

    /// The external command exited with a non-zero status
    #[error("{program} failed: {stderr}")]
    CommandFailed {
        /// Program that was invoked
        program: String,
        /// Filtered stderr output
        stderr: String,
    },

    /// The external command did not finish in time
    #[error("{program} timed out after {timeout_secs} seconds")]
    TimedOut {
        /// Program that was invoked
        program: String,
        /// Configured timeout
        timeout_secs: u64,
    },

    /// The command succeeded but its output could not be understood
    #[error("Failed to parse output of {program}: {message}")]
    ParseError {
        /// Program that produced the output
        program: String,
        /// Parser message
        message: String,
    },

    /// An expected output file was not produced
    #[error("Expected output was not produced: {0}")]
    MissingOutput(PathBuf),
}

/// Errors that can occur while composing or writing subtitle artifacts
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Failed to write a subtitle artifact
    #[error("Failed to write {path}: {message}")]
    WriteFailed {
        /// Artifact path
        path: PathBuf,
        /// Underlying error message
        message: String,
    },
}

/// Configuration contract violations, raised before any clip is processed
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// Group size bounds are inconsistent
    #[error("Invalid group size range: min {min}, max {max} (need 1 <= min <= max)")]
    InvalidGroupRange {
        /// Configured minimum
        min: usize,
        /// Configured maximum
        max: usize,
    },

    /// A style value is out of range or malformed
    #[error("Invalid style value for {key}: {message}")]
    InvalidStyle {
        /// Style key
        key: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// A pipeline setting is unusable
    #[error("Invalid pipeline setting {key}: {message}")]
    InvalidPipeline {
        /// Setting key
        key: &'static str,
        /// What is wrong with it
        message: String,
    },
}

/// Failure of a single clip in the pipeline
#[derive(Error, Debug)]
#[error("Clip {index} failed: {message}")]
pub struct ClipError {
    /// 1-based clip index
    pub index: usize,
    /// Full cause chain, outermost context first
    pub message: String,
    /// Underlying cause
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl ClipError {
    /// Wrap an error raised while processing clip `index`
    pub fn new(index: usize, source: anyhow::Error) -> Self {
        Self {
            index,
            message: format!("{:#}", source),
            source: source.into(),
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from an external collaborator
    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A clip failed and the run was halted
    #[error("Pipeline error: {0}")]
    Clip(#[from] ClipError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
