//! Error types for the mf-app service layer.

use std::path::PathBuf;

use mf_editor::SessionError;
use mf_graph::GraphError;

/// Unified error for front-ends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {what}: {message}")]
    Parse { what: &'static str, message: String },

    #[error("Unsupported mission version: {version} (latest is {latest})")]
    UnsupportedVersion { version: u32, latest: u32 },

    #[error("Unknown node alias in script: {alias}")]
    UnknownAlias { alias: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Editor error: {0}")]
    Session(#[from] SessionError),

    #[error("Template error: {0}")]
    Templates(String),
}

/// Result type for mf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<mf_templates::TemplateError> for AppError {
    fn from(err: mf_templates::TemplateError) -> Self {
        AppError::Templates(err.to_string())
    }
}

impl From<mf_core::CoreError> for AppError {
    fn from(err: mf_core::CoreError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
