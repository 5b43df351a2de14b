//! # infragen_iac
//!
//! Terraform generation for AWS, Azure and Google Cloud.
//!
//! A [`GenerationConfig`] names one provider and a list of resources. The
//! [`TerraformGenerator`] resolves them in two passes, base networking
//! resources first and everything else second, so that each resource can
//! refer to the others through Terraform reference expressions such as
//! `aws_vpc.main.id`. The resolved fields are then rendered through a
//! [`TemplateRenderer`](infragen_templates::TemplateRenderer).
//!
//! ## Features
//!
//! - Provider blocks with credentials taken from the environment
//! - Per-provider dependency resolution with a shared reference table
//! - JSON and YAML configuration
//! - Plans that show emission order and wiring without rendering
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use infragen_iac::{Credentials, GenerationConfig, OutputWriter, TerraformGenerator};
//! use infragen_templates::TemplateLoader;
//!
//! let renderer = TemplateLoader::new("templates").load().unwrap();
//! let config = GenerationConfig::from_file(Path::new("config.json")).unwrap();
//!
//! let generator = TerraformGenerator::new(Arc::new(renderer))
//!     .with_credentials(Credentials::from_env());
//! let output = generator.generate(&config).unwrap();
//!
//! OutputWriter::new("output").write(&output).unwrap();
//! ```

pub mod config;
pub mod credentials;
pub mod error;
pub mod generator;
pub mod provider;
pub mod provider_block;
pub mod refs;
pub mod resolver;
pub mod resource;
pub mod writer;

pub use config::{is_terraform_identifier, GenerationConfig};
pub use credentials::Credentials;
pub use error::{IacError, IacResult};
pub use generator::{
    emission_order, GeneratedOutput, GenerationPlan, Pass, PlanEntry, TerraformGenerator,
};
pub use provider::CloudProvider;
pub use provider_block::ProviderBlock;
pub use refs::{reference, Attributes, ReferenceTable};
pub use resolver::{resolver_for, DependencyResolver, HandlerTable};
pub use resource::ResourceDeclaration;
pub use writer::OutputWriter;
