//! Converter errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors from a single converter invocation
#[derive(Debug, Error)]
pub enum PandocError {
    #[error("pandoc executable not found (set MDTREE_PANDOC or add pandoc to PATH)")]
    NotFound,

    #[error("failed to launch {}: {source}", program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to prepare temporary input file: {0}")]
    TempFile(#[source] std::io::Error),

    #[error("pandoc conversion failed: {stderr}")]
    ConversionFailure { code: Option<i32>, stderr: String },

    #[error("pandoc output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("failed to parse pandoc output as JSON: {0}")]
    Format(#[source] serde_json::Error),
}

/// Result type for converter operations
pub type Result<T> = std::result::Result<T, PandocError>;
