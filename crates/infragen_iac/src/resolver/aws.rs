//! AWS dependency resolution.

use crate::error::{IacError, IacResult};
use crate::provider::CloudProvider;
use crate::refs::{reference, ReferenceTable};
use crate::resource::ResourceDeclaration;

use super::{DependencyResolver, HandlerTable};

/// Resolver for the `aws` provider.
pub struct AwsResolver {
    handlers: HandlerTable,
}

impl Default for AwsResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AwsResolver {
    pub fn new() -> Self {
        Self {
            handlers: HandlerTable::new()
                .on(&["vpc"], vpc)
                .on(&["subnet"], subnet)
                .on(&["security_group"], security_group)
                .on(&["instance", "ec2_instance"], instance)
                .on(&["db_instance"], db_instance),
        }
    }
}

impl DependencyResolver for AwsResolver {
    fn provider(&self) -> CloudProvider {
        CloudProvider::Aws
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

fn vpc(resource: &mut ResourceDeclaration, refs: &mut ReferenceTable) -> IacResult<()> {
    let name = resource.name().to_string();
    refs.set(
        "vpc",
        [
            ("id", reference("aws_vpc", &name, "id")),
            ("cidr_block", reference("aws_vpc", &name, "cidr_block")),
            ("name", name),
        ],
    );
    Ok(())
}

/// `vpc_name` stays as supplied; the link to the VPC is the added `vpc_id`.
fn subnet(resource: &mut ResourceDeclaration, refs: &mut ReferenceTable) -> IacResult<()> {
    let name = resource.name().to_string();
    let vpc_name = required_vpc(resource, "Subnet", &name)?;
    resource.set("vpc_id", reference("aws_vpc", &vpc_name, "id"));

    refs.set(
        "subnet",
        [
            ("id", reference("aws_subnet", &name, "id")),
            ("arn", reference("aws_subnet", &name, "arn")),
            ("name", name),
        ],
    );
    Ok(())
}

fn security_group(resource: &mut ResourceDeclaration, refs: &mut ReferenceTable) -> IacResult<()> {
    let name = resource.name().to_string();
    let vpc_name = required_vpc(resource, "Security Group", &name)?;
    resource.set("vpc_id", reference("aws_vpc", &vpc_name, "id"));

    refs.set(
        "security_group",
        [
            ("id", reference("aws_security_group", &name, "id")),
            ("name", name),
        ],
    );
    Ok(())
}

fn instance(resource: &mut ResourceDeclaration, _refs: &mut ReferenceTable) -> IacResult<()> {
    link_network(resource, "subnet_id");
    Ok(())
}

fn db_instance(resource: &mut ResourceDeclaration, _refs: &mut ReferenceTable) -> IacResult<()> {
    link_network(resource, "db_subnet_group_name");
    Ok(())
}

fn required_vpc(resource: &ResourceDeclaration, label: &str, name: &str) -> IacResult<String> {
    resource
        .non_empty_str("vpc_name")
        .map(str::to_string)
        .ok_or_else(|| IacError::missing_dependency(format!("{} {}", label, name), "vpc_name"))
}

/// Point `subnet_field` and the security group list at the named resources.
/// Both inputs are optional.
fn link_network(resource: &mut ResourceDeclaration, subnet_field: &str) {
    if let Some(subnet_name) = resource.non_empty_str("subnet_name").map(str::to_string) {
        resource.set(subnet_field, reference("aws_subnet", &subnet_name, "id"));
    }
    if let Some(sg_name) = resource.non_empty_str("security_group_name").map(str::to_string) {
        resource.set(
            "vpc_security_group_ids",
            vec![reference("aws_security_group", &sg_name, "id")],
        );
    }
}
