//! Resource template rendering.

use std::collections::BTreeSet;
use std::error::Error as StdError;

use serde_json::{Map, Value};
use tera::{Context, Tera};
use tracing::debug;

use crate::error::{TemplateError, TemplateResult};
use crate::filters;

/// File extension used by resource templates.
pub const TEMPLATE_EXTENSION: &str = "j2";

/// Build the registry name for a provider's resource template.
pub fn template_name(provider: &str, resource_type: &str) -> String {
    format!("{}/{}.{}", provider, resource_type, TEMPLATE_EXTENSION)
}

/// Renders one resource's fields into provider-specific text.
///
/// Implementations select the template from `(provider, resource_type)` and
/// must fail with [`TemplateError::NotFound`] when none exists.
pub trait TemplateRenderer: Send + Sync {
    /// Render the template for `(provider, resource_type)` with `fields` as context.
    fn render(
        &self,
        provider: &str,
        resource_type: &str,
        fields: &Map<String, Value>,
    ) -> TemplateResult<String>;

    /// Check whether a template exists for `(provider, resource_type)`.
    fn has_template(&self, provider: &str, resource_type: &str) -> bool;
}

/// Tera-backed renderer holding every known resource template.
pub struct TeraRenderer {
    tera: Tera,
}

impl Default for TeraRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TeraRenderer {
    /// Create a renderer with no templates and the HCL filters registered.
    pub fn new() -> Self {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        filters::register(&mut tera);
        Self { tera }
    }

    /// Create a renderer from in-memory `(name, content)` pairs.
    ///
    /// Names follow the `<provider>/<type>.j2` layout.
    pub fn from_raw<I, N, C>(templates: I) -> TemplateResult<Self>
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: AsRef<str>,
    {
        let mut renderer = Self::new();
        for (name, content) in templates {
            renderer.add_template(name.as_ref(), content.as_ref())?;
        }
        Ok(renderer)
    }

    /// Register a single template under `name`.
    pub fn add_template(&mut self, name: &str, content: &str) -> TemplateResult<()> {
        debug!("Registering template {}", name);
        self.tera
            .add_raw_template(name, content)
            .map_err(|e| TemplateError::InvalidTemplate {
                name: name.to_string(),
                message: describe(&e),
            })
    }

    /// Registered template names, sorted.
    pub fn template_names(&self) -> BTreeSet<String> {
        self.tera
            .get_template_names()
            .map(|name| name.to_string())
            .collect()
    }

    /// Resource types with a template for `provider`, sorted.
    pub fn resource_types(&self, provider: &str) -> Vec<String> {
        let prefix = format!("{}/", provider);
        let suffix = format!(".{}", TEMPLATE_EXTENSION);
        self.template_names()
            .into_iter()
            .filter_map(|name| {
                name.strip_prefix(&prefix)
                    .and_then(|rest| rest.strip_suffix(&suffix))
                    .map(|rest| rest.to_string())
            })
            .collect()
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.tera.get_template_names().count()
    }

    /// Check if no templates are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateRenderer for TeraRenderer {
    fn render(
        &self,
        provider: &str,
        resource_type: &str,
        fields: &Map<String, Value>,
    ) -> TemplateResult<String> {
        if !self.has_template(provider, resource_type) {
            return Err(TemplateError::NotFound {
                provider: provider.to_string(),
                resource_type: resource_type.to_string(),
            });
        }

        let name = template_name(provider, resource_type);
        let context = Context::from_serialize(fields).map_err(|e| TemplateError::RenderingFailed {
            name: name.clone(),
            message: describe(&e),
        })?;

        let rendered = self
            .tera
            .render(&name, &context)
            .map_err(|e| TemplateError::RenderingFailed {
                name: name.clone(),
                message: describe(&e),
            })?;

        // The generator supplies block separators.
        Ok(match rendered.strip_suffix('\n') {
            Some(trimmed) => trimmed.to_string(),
            None => rendered,
        })
    }

    fn has_template(&self, provider: &str, resource_type: &str) -> bool {
        let name = template_name(provider, resource_type);
        self.tera.get_template_names().any(|n| n == name)
    }
}

impl std::fmt::Debug for TeraRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeraRenderer")
            .field("templates", &self.template_names())
            .finish()
    }
}

/// Flatten a Tera error and its sources into one message.
fn describe(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = StdError::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
