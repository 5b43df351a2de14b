//! Error types for IaC generation.

use thiserror::Error;

use infragen_templates::TemplateError;

/// Result type alias for IaC operations.
pub type IacResult<T> = Result<T, IacError>;

/// Errors that can occur while generating Terraform.
///
/// Every variant is fatal for the run that raised it.
#[derive(Error, Debug)]
pub enum IacError {
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("{resource} requires a {field}")]
    MissingDependency { resource: String, field: String },

    #[error("Template not found: {provider}/{resource_type}.j2")]
    TemplateNotFound {
        provider: String,
        resource_type: String,
    },

    #[error("Template error: {0}")]
    Template(TemplateError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl IacError {
    pub(crate) fn missing_dependency(resource: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingDependency {
            resource: resource.into(),
            field: field.into(),
        }
    }
}

impl From<TemplateError> for IacError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::NotFound {
                provider,
                resource_type,
            } => IacError::TemplateNotFound {
                provider,
                resource_type,
            },
            other => IacError::Template(other),
        }
    }
}
