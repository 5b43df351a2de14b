//! Error types for templates.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur during template operations.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {provider}/{resource_type}.j2")]
    NotFound {
        provider: String,
        resource_type: String,
    },

    #[error("Invalid template {name}: {message}")]
    InvalidTemplate { name: String, message: String },

    #[error("Template rendering failed for {name}: {message}")]
    RenderingFailed { name: String, message: String },

    #[error("Templates directory does not exist: {0}")]
    MissingDirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
