//! Azure dependency resolution.

use crate::error::IacResult;
use crate::provider::CloudProvider;
use crate::refs::{reference, ReferenceTable};
use crate::resource::ResourceDeclaration;

use super::{value_text, DependencyResolver, HandlerTable};

/// Resolver for the `azurerm` provider.
///
/// Every resource carrying `resource_group_name` is first pointed at that
/// resource group, whatever its type.
pub struct AzureResolver {
    handlers: HandlerTable,
}

impl Default for AzureResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AzureResolver {
    pub fn new() -> Self {
        Self {
            handlers: HandlerTable::new()
                .on(&["virtual_network"], virtual_network)
                .on(&["subnet"], subnet)
                .on(&["network_interface"], network_interface)
                .on(&["linux_virtual_machine"], linux_virtual_machine)
                // Known types that need nothing beyond the resource group.
                .on(&["mysql_flexible_server", "storage_account"], no_wiring),
        }
    }
}

impl DependencyResolver for AzureResolver {
    fn provider(&self) -> CloudProvider {
        CloudProvider::Azure
    }

    fn handles(&self, resource_type: &str) -> bool {
        self.handlers.handles(resource_type)
    }

    fn resolve(
        &self,
        mut resource: ResourceDeclaration,
        refs: &mut ReferenceTable,
    ) -> IacResult<ResourceDeclaration> {
        link_resource_group(&mut resource, refs);
        self.handlers.apply(&mut resource, refs)?;
        Ok(resource)
    }
}

fn link_resource_group(resource: &mut ResourceDeclaration, refs: &mut ReferenceTable) {
    let Some(rg_name) = resource.get("resource_group_name").map(value_text) else {
        return;
    };
    resource.set(
        "resource_group_name",
        reference("azurerm_resource_group", &rg_name, "name"),
    );
    refs.set("resource_group", [("name", rg_name)]);
}

fn virtual_network(resource: &mut ResourceDeclaration, refs: &mut ReferenceTable) -> IacResult<()> {
    let name = resource.name().to_string();
    refs.set(
        "vnet",
        [
            ("id", reference("azurerm_virtual_network", &name, "id")),
            ("name_ref", reference("azurerm_virtual_network", &name, "name")),
            ("name", name),
        ],
    );
    Ok(())
}

fn subnet(resource: &mut ResourceDeclaration, refs: &mut ReferenceTable) -> IacResult<()> {
    if let Some(vnet_name) = resource.get("virtual_network_name").map(value_text) {
        resource.set(
            "virtual_network_name",
            reference("azurerm_virtual_network", &vnet_name, "name"),
        );
    }

    let name = resource.name().to_string();
    refs.set(
        "subnet",
        [
            ("id", reference("azurerm_subnet", &name, "id")),
            ("name", name),
        ],
    );
    Ok(())
}

fn network_interface(resource: &mut ResourceDeclaration, refs: &mut ReferenceTable) -> IacResult<()> {
    if resource.contains("subnet_id") {
        let subnet_id = refs.attribute("subnet", "id").unwrap_or_default().to_string();
        resource.set("subnet_id", subnet_id);
    }

    let name = resource.name().to_string();
    refs.set(
        "nic",
        [
            ("id", reference("azurerm_network_interface", &name, "id")),
            ("name", name),
        ],
    );
    Ok(())
}

fn linux_virtual_machine(resource: &mut ResourceDeclaration, refs: &mut ReferenceTable) -> IacResult<()> {
    let nic_id = refs.attribute("nic", "id").unwrap_or_default().to_string();
    resource.set("network_interface_ids", vec![nic_id]);
    Ok(())
}

fn no_wiring(_resource: &mut ResourceDeclaration, _refs: &mut ReferenceTable) -> IacResult<()> {
    Ok(())
}
