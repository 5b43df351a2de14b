//! Provider dependency resolvers.
//!
//! A resolver rewrites a resource's fields so that names of other resources
//! become Terraform reference expressions, and records the references this
//! resource makes available to later ones. Each provider dispatches on the
//! resource type through a [`HandlerTable`]; unknown types pass through.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::error::IacResult;
use crate::provider::CloudProvider;
use crate::refs::ReferenceTable;
use crate::resource::ResourceDeclaration;

pub mod aws;
pub mod azure;
pub mod gcp;

pub use aws::AwsResolver;
pub use azure::AzureResolver;
pub use gcp::GcpResolver;

/// A per-type resolution step.
pub type Handler = fn(&mut ResourceDeclaration, &mut ReferenceTable) -> IacResult<()>;

/// Resolves one resource against the references registered so far.
pub trait DependencyResolver: Send + Sync {
    /// The provider this resolver understands.
    fn provider(&self) -> CloudProvider;

    /// Whether `resource_type` has dedicated wiring beyond pass-through.
    fn handles(&self, resource_type: &str) -> bool;

    /// Rewrite `resource` and register whatever references it provides.
    fn resolve(
        &self,
        resource: ResourceDeclaration,
        refs: &mut ReferenceTable,
    ) -> IacResult<ResourceDeclaration>;
}

/// Get the resolver for a provider.
pub fn resolver_for(provider: CloudProvider) -> Box<dyn DependencyResolver> {
    match provider {
        CloudProvider::Aws => Box::new(AwsResolver::new()),
        CloudProvider::Azure => Box::new(AzureResolver::new()),
        CloudProvider::Gcp => Box::new(GcpResolver::new()),
    }
}

/// Resource type → handler, defaulting to a pass-through.
#[derive(Default)]
pub struct HandlerTable {
    handlers: HashMap<&'static str, Handler>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route every type in `types` to `handler`.
    pub fn on(mut self, types: &[&'static str], handler: Handler) -> Self {
        for resource_type in types {
            self.handlers.insert(*resource_type, handler);
        }
        self
    }

    pub fn handles(&self, resource_type: &str) -> bool {
        self.handlers.contains_key(resource_type)
    }

    /// Run the handler registered for the resource's type.
    pub fn apply(
        &self,
        resource: &mut ResourceDeclaration,
        refs: &mut ReferenceTable,
    ) -> IacResult<()> {
        match self.handlers.get(resource.resource_type()) {
            Some(handler) => {
                debug!(
                    "Resolving {} {}",
                    resource.resource_type(),
                    resource.name()
                );
                handler(resource, refs)
            }
            None => pass_through(resource, refs),
        }
    }
}

fn pass_through(_resource: &mut ResourceDeclaration, _refs: &mut ReferenceTable) -> IacResult<()> {
    Ok(())
}

/// Text of a field value as written into an expression.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
