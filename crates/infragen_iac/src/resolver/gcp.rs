//! Google Cloud dependency resolution.
//!
//! Unlike AWS, Google resources do not name their network explicitly: each
//! one links to whatever network or subnetwork was registered last.

use serde_json::json;

use crate::error::IacResult;
use crate::provider::CloudProvider;
use crate::refs::{reference, ReferenceTable};
use crate::resource::ResourceDeclaration;

use super::{DependencyResolver, HandlerTable};

/// Resolver for the `google` provider.
pub struct GcpResolver {
    handlers: HandlerTable,
}

impl Default for GcpResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl GcpResolver {
    pub fn new() -> Self {
        Self {
            handlers: HandlerTable::new()
                .on(&["compute_network"], compute_network)
                .on(&["compute_subnetwork"], compute_subnetwork)
                .on(&["compute_firewall"], compute_firewall)
                .on(&["compute_instance"], compute_instance)
                .on(&["sql_database_instance"], sql_database_instance),
        }
    }
}

impl DependencyResolver for GcpResolver {
    fn provider(&self) -> CloudProvider {
        CloudProvider::Gcp
    }

    fn handles(&self, resource_type: &str) -> bool {
        self.handlers.handles(resource_type)
    }

    fn resolve(
        &self,
        mut resource: ResourceDeclaration,
        refs: &mut ReferenceTable,
    ) -> IacResult<ResourceDeclaration> {
        self.handlers.apply(&mut resource, refs)?;
        Ok(resource)
    }
}

fn compute_network(resource: &mut ResourceDeclaration, refs: &mut ReferenceTable) -> IacResult<()> {
    let name = resource.name();
    refs.set(
        "network",
        [
            ("id", reference("google_compute_network", name, "id")),
            ("name", reference("google_compute_network", name, "name")),
            ("self_link", reference("google_compute_network", name, "self_link")),
        ],
    );
    Ok(())
}

fn compute_subnetwork(resource: &mut ResourceDeclaration, refs: &mut ReferenceTable) -> IacResult<()> {
    link_current_network(resource, refs);

    let name = resource.name();
    refs.set(
        "subnetwork",
        [
            ("id", reference("google_compute_subnetwork", name, "id")),
            ("self_link", reference("google_compute_subnetwork", name, "self_link")),
        ],
    );
    Ok(())
}

fn compute_firewall(resource: &mut ResourceDeclaration, refs: &mut ReferenceTable) -> IacResult<()> {
    link_current_network(resource, refs);

    refs.set(
        "firewall",
        [("id", reference("google_compute_firewall", resource.name(), "id"))],
    );
    Ok(())
}

fn compute_instance(resource: &mut ResourceDeclaration, refs: &mut ReferenceTable) -> IacResult<()> {
    let subnetwork = refs.get("subnetwork");
    if !subnetwork.is_empty() {
        let self_link = subnetwork.get("self_link").cloned().unwrap_or_default();
        resource.set("network_interface", json!([{ "subnetwork": self_link }]));
    }
    Ok(())
}

fn sql_database_instance(resource: &mut ResourceDeclaration, refs: &mut ReferenceTable) -> IacResult<()> {
    let network = refs.get("network");
    if !network.is_empty() {
        let self_link = network.get("self_link").cloned().unwrap_or_default();
        resource.set("private_network", self_link);
    }
    Ok(())
}

/// Set `network` to the last registered network's self link, or `""`.
fn link_current_network(resource: &mut ResourceDeclaration, refs: &ReferenceTable) {
    let self_link = refs.attribute("network", "self_link").unwrap_or_default();
    resource.set("network", self_link);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn resolve(resource: ResourceDeclaration, refs: &mut ReferenceTable) -> ResourceDeclaration {
        GcpResolver::new().resolve(resource, refs).unwrap()
    }

    #[test]
    fn test_network_registers_references() {
        let mut refs = ReferenceTable::new();
        resolve(ResourceDeclaration::new("compute_network", "vpc"), &mut refs);

        assert_eq!(refs.attribute("network", "id"), Some("google_compute_network.vpc.id"));
        assert_eq!(refs.attribute("network", "name"), Some("google_compute_network.vpc.name"));
        assert_eq!(
            refs.attribute("network", "self_link"),
            Some("google_compute_network.vpc.self_link")
        );
    }

    #[test]
    fn test_subnetwork_links_network() {
        let mut refs = ReferenceTable::new();
        resolve(ResourceDeclaration::new("compute_network", "vpc"), &mut refs);
        let subnet = resolve(ResourceDeclaration::new("compute_subnetwork", "app"), &mut refs);

        assert_eq!(subnet.get_str("network"), Some("google_compute_network.vpc.self_link"));
        assert_eq!(
            refs.attribute("subnetwork", "self_link"),
            Some("google_compute_subnetwork.app.self_link")
        );
        assert_eq!(refs.attribute("subnetwork", "id"), Some("google_compute_subnetwork.app.id"));
    }

    #[test]
    fn test_subnetwork_without_network_gets_empty_link() {
        let mut refs = ReferenceTable::new();
        let subnet = resolve(
            ResourceDeclaration::new("compute_subnetwork", "app").with_field("network", "manual"),
            &mut refs,
        );

        assert_eq!(subnet.get_str("network"), Some(""));
        assert!(refs.contains("subnetwork"));
    }

    #[test]
    fn test_firewall_links_network() {
        let mut refs = ReferenceTable::new();
        resolve(ResourceDeclaration::new("compute_network", "vpc"), &mut refs);
        let firewall = resolve(ResourceDeclaration::new("compute_firewall", "allow-ssh"), &mut refs);

        assert_eq!(firewall.get_str("network"), Some("google_compute_network.vpc.self_link"));
        assert_eq!(refs.get("firewall").len(), 1);
        assert_eq!(
            refs.attribute("firewall", "id"),
            Some("google_compute_firewall.allow-ssh.id")
        );
    }

    #[test]
    fn test_instance_uses_subnetwork() {
        let mut refs = ReferenceTable::new();
        resolve(ResourceDeclaration::new("compute_subnetwork", "app"), &mut refs);
        let vm = resolve(ResourceDeclaration::new("compute_instance", "vm1"), &mut refs);

        assert_eq!(
            vm.get("network_interface"),
            Some(&json!([{"subnetwork": "google_compute_subnetwork.app.self_link"}]))
        );
    }

    #[test]
    fn test_instance_without_subnetwork_is_untouched() {
        let mut refs = ReferenceTable::new();
        let input = ResourceDeclaration::new("compute_instance", "vm1");
        let vm = resolve(input.clone(), &mut refs);

        assert_eq!(vm, input);
        assert!(!vm.contains("network_interface"));
    }

    #[test]
    fn test_instance_keeps_own_interface_without_subnetwork() {
        let mut refs = ReferenceTable::new();
        let vm = resolve(
            ResourceDeclaration::new("compute_instance", "vm1")
                .with_field("network_interface", json!([{"network": "default"}])),
            &mut refs,
        );

        assert_eq!(vm.get("network_interface"), Some(&json!([{"network": "default"}])));
    }

    #[test]
    fn test_sql_private_network() {
        let mut refs = ReferenceTable::new();
        let without = resolve(ResourceDeclaration::new("sql_database_instance", "db"), &mut refs);
        assert!(!without.contains("private_network"));

        resolve(ResourceDeclaration::new("compute_network", "vpc"), &mut refs);
        let with = resolve(ResourceDeclaration::new("sql_database_instance", "db"), &mut refs);
        assert_eq!(
            with.get("private_network"),
            Some(&Value::String("google_compute_network.vpc.self_link".into()))
        );
    }

    #[test]
    fn test_second_network_overwrites_first() {
        let mut refs = ReferenceTable::new();
        resolve(ResourceDeclaration::new("compute_network", "first"), &mut refs);
        resolve(ResourceDeclaration::new("compute_network", "second"), &mut refs);
        let subnet = resolve(ResourceDeclaration::new("compute_subnetwork", "app"), &mut refs);

        assert_eq!(subnet.get_str("network"), Some("google_compute_network.second.self_link"));
    }
}
