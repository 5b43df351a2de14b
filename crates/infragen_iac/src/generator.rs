//! Two-pass Terraform generation.
//!
//! Base resources (networking primitives) are resolved and rendered before
//! anything else, so a dependent resource can reference them even when it is
//! declared first. Within a pass, resources keep their input order.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use infragen_templates::TemplateRenderer;

use crate::config::GenerationConfig;
use crate::credentials::Credentials;
use crate::error::IacResult;
use crate::provider::CloudProvider;
use crate::provider_block::ProviderBlock;
use crate::refs::ReferenceTable;
use crate::resolver::resolver_for;
use crate::resource::ResourceDeclaration;

/// Separator written after every block.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Which pass emits a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pass {
    Base,
    Dependent,
}

impl Pass {
    pub fn for_resource(provider: CloudProvider, resource_type: &str) -> Self {
        if provider.is_base(resource_type) {
            Pass::Base
        } else {
            Pass::Dependent
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::Base => write!(f, "base"),
            Pass::Dependent => write!(f, "dependent"),
        }
    }
}

/// Resources in emission order: every base resource, then every other one.
pub fn emission_order(
    provider: CloudProvider,
    resources: &[ResourceDeclaration],
) -> impl Iterator<Item = (Pass, &ResourceDeclaration)> {
    let in_pass = move |pass: Pass| {
        resources
            .iter()
            .filter(move |r| Pass::for_resource(provider, r.resource_type()) == pass)
            .map(move |r| (pass, r))
    };
    in_pass(Pass::Base).chain(in_pass(Pass::Dependent))
}

/// Rendered Terraform for one provider run.
#[derive(Debug, Clone)]
pub struct GeneratedOutput {
    pub provider: CloudProvider,
    /// Provider block first, then one block per resource in emission order.
    pub blocks: Vec<String>,
    /// References registered during the run.
    pub references: ReferenceTable,
}

impl GeneratedOutput {
    /// The full file: every block followed by a blank line.
    pub fn content(&self) -> String {
        let mut content = String::new();
        for block in &self.blocks {
            content.push_str(block);
            content.push_str(BLOCK_SEPARATOR);
        }
        content
    }

    /// Number of rendered resources, excluding the provider block.
    pub fn resource_count(&self) -> usize {
        self.blocks.len().saturating_sub(1)
    }
}

impl fmt::Display for GeneratedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content())
    }
}

/// One resource as it would be emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    pub pass: Pass,
    pub resource_type: String,
    pub name: String,
    /// Whether the resolver has dedicated wiring for this type.
    pub wired: bool,
}

/// Emission order and references of a run, without rendering.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationPlan {
    pub provider: CloudProvider,
    pub entries: Vec<PlanEntry>,
    pub references: ReferenceTable,
}

/// Generates Terraform from a configuration.
pub struct TerraformGenerator {
    renderer: Arc<dyn TemplateRenderer>,
    credentials: Credentials,
}

impl TerraformGenerator {
    /// Create a generator rendering through `renderer`, with empty credentials.
    pub fn new(renderer: Arc<dyn TemplateRenderer>) -> Self {
        Self {
            renderer,
            credentials: Credentials::empty(),
        }
    }

    /// Use these credentials in the provider block.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Resolve and render every resource of `config`.
    ///
    /// The first failure aborts the run; nothing partial is returned.
    pub fn generate(&self, config: &GenerationConfig) -> IacResult<GeneratedOutput> {
        let provider = config.cloud_provider()?;
        let resolver = resolver_for(provider);
        info!(
            "Generating Terraform for {} ({} resources)",
            provider,
            config.resources.len()
        );

        let mut references = ReferenceTable::new();
        let mut blocks = Vec::with_capacity(config.resources.len() + 1);
        blocks.push(ProviderBlock::render(provider, &config.region, &self.credentials));

        for (pass, resource) in emission_order(provider, &config.resources) {
            let resolved = resolver.resolve(resource.clone(), &mut references)?;
            debug!(
                "Rendering {} resource {} {}",
                pass,
                resolved.resource_type(),
                resolved.name()
            );
            let rendered = self.renderer.render(
                provider.as_str(),
                resolved.resource_type(),
                resolved.fields(),
            )?;
            blocks.push(rendered);
        }

        info!("Resource dependencies tracked: {:?}", references.categories());

        Ok(GeneratedOutput {
            provider,
            blocks,
            references,
        })
    }

    /// Run both passes without rendering.
    ///
    /// Fails exactly where [`generate`](Self::generate) would fail during
    /// resolution, so a configuration can be checked without templates.
    pub fn plan(config: &GenerationConfig) -> IacResult<GenerationPlan> {
        let provider = config.cloud_provider()?;
        let resolver = resolver_for(provider);
        let mut references = ReferenceTable::new();
        let mut entries = Vec::with_capacity(config.resources.len());

        for (pass, resource) in emission_order(provider, &config.resources) {
            let resolved = resolver.resolve(resource.clone(), &mut references)?;
            entries.push(PlanEntry {
                pass,
                resource_type: resolved.resource_type().to_string(),
                name: resolved.name().to_string(),
                wired: resolver.handles(resolved.resource_type()),
            });
        }

        Ok(GenerationPlan {
            provider,
            entries,
            references,
        })
    }
}
