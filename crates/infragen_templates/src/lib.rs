//! # infragen_templates
//!
//! Resource template loading and rendering for infragen.
//!
//! Templates are Jinja-style files rendered with Tera, one per provider and
//! resource type, laid out as `<templates>/<provider>/<type>.j2`. A
//! resource's resolved fields become the template context.
//!
//! ## Example
//!
//! ```rust,no_run
//! use infragen_templates::{TemplateLoader, TemplateRenderer};
//! use serde_json::json;
//!
//! let renderer = TemplateLoader::new("templates").load().unwrap();
//! let fields = json!({"type": "vpc", "name": "main", "cidr_block": "10.0.0.0/16"});
//! let hcl = renderer
//!     .render("aws", "vpc", fields.as_object().unwrap())
//!     .unwrap();
//! ```

pub mod error;
pub mod filters;
pub mod loader;
pub mod renderer;

pub use error::{TemplateError, TemplateResult};
pub use loader::TemplateLoader;
pub use renderer::{template_name, TemplateRenderer, TeraRenderer, TEMPLATE_EXTENSION};
