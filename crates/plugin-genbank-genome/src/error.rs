//! Unified error type for the Genbank conversion plugin.
//!
//! Precondition, launch and tool failures are consolidated into a single
//! `ConversionError` enum that maps cleanly to `transform_core::AppError`.

use std::path::PathBuf;
use thiserror::Error;
use transform_core::error::AppError;

/// Unified error type for all Genbank conversion operations.
#[derive(Debug, Error)]
pub enum ConversionError {
    // --- Precondition errors ---
    /// A required parameter was empty.
    #[error("Invalid transform parameters: {0}")]
    InvalidParams(String),

    /// One or more classpath libraries are not installed.
    #[error("Unable to find classpath {}: {}", plural(.missing), display_paths(.missing))]
    MissingDependencies {
        /// Every missing library, in manifest order.
        missing: Vec<PathBuf>,
    },

    /// A classpath entry contains the platform path separator.
    #[error("Classpath entry cannot be joined: {path}")]
    InvalidClasspathEntry {
        /// The offending entry.
        path: PathBuf,
    },

    // --- Process execution errors ---
    /// The interpreter could not be found.
    #[error("Conversion tool not found: {program}")]
    ToolNotFound {
        /// The program that was launched.
        program: String,
    },

    /// The tool exited with a non-zero status.
    #[error(
        "Transformation from Genbank.Genome to KBaseGenomes.Genome failed on {input_directory} (exit status {code})"
    )]
    ToolFailed {
        /// Input directory of the failed run.
        input_directory: String,
        /// The exit code.
        code: i32,
    },

    /// The tool was terminated by a signal.
    #[error(
        "Transformation from Genbank.Genome to KBaseGenomes.Genome failed on {input_directory} (tool killed by signal)"
    )]
    ToolKilled {
        /// Input directory of the failed run.
        input_directory: String,
    },

    /// The tool ran longer than the configured timeout.
    #[error(
        "Transformation from Genbank.Genome to KBaseGenomes.Genome failed on {input_directory} (timed out after {timeout_seconds}s)"
    )]
    ToolTimeout {
        /// Input directory of the failed run.
        input_directory: String,
        /// The timeout that was exceeded.
        timeout_seconds: u64,
    },

    // --- Generic errors ---
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConversionError {
    /// Whether the error was raised before any process was launched.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InvalidParams(_)
                | Self::MissingDependencies { .. }
                | Self::InvalidClasspathEntry { .. }
        )
    }
}

fn plural(paths: &[PathBuf]) -> &'static str {
    if paths.len() == 1 {
        "library"
    } else {
        "libraries"
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<validator::ValidationErrors> for ConversionError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::InvalidParams(err.to_string())
    }
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match &err {
            ConversionError::InvalidParams(_) => AppError::validation(err.to_string()),
            ConversionError::MissingDependencies { .. }
            | ConversionError::InvalidClasspathEntry { .. } => {
                AppError::missing_dependency(err.to_string())
            }
            ConversionError::ToolNotFound { .. }
            | ConversionError::ToolFailed { .. }
            | ConversionError::ToolKilled { .. }
            | ConversionError::ToolTimeout { .. } => AppError::external_tool(err.to_string()),
            ConversionError::Io(_) => AppError::internal(err.to_string()),
        }
    }
}
