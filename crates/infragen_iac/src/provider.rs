//! Cloud provider definitions and base-resource classification.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IacError;

/// Supported cloud providers, keyed by their Terraform provider name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CloudProvider {
    #[serde(rename = "aws")]
    Aws,
    #[serde(rename = "azurerm")]
    Azure,
    #[serde(rename = "google")]
    Gcp,
}

const AWS_BASE: &[&str] = &["vpc", "subnet", "security_group"];
const AZURE_BASE: &[&str] = &["resource_group", "virtual_network", "subnet"];
const GCP_BASE: &[&str] = &["compute_network", "compute_subnetwork", "compute_firewall"];

impl CloudProvider {
    /// Terraform provider name, also used for template and output directories.
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Azure => "azurerm",
            CloudProvider::Gcp => "google",
        }
    }

    /// Parse a provider name. Only the exact Terraform names are recognized.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "aws" => Some(CloudProvider::Aws),
            "azurerm" => Some(CloudProvider::Azure),
            "google" => Some(CloudProvider::Gcp),
            _ => None,
        }
    }

    pub fn all() -> Vec<Self> {
        vec![CloudProvider::Aws, CloudProvider::Azure, CloudProvider::Gcp]
    }

    /// Resource types emitted in the first pass.
    pub fn base_resources(&self) -> &'static [&'static str] {
        match self {
            CloudProvider::Aws => AWS_BASE,
            CloudProvider::Azure => AZURE_BASE,
            CloudProvider::Gcp => GCP_BASE,
        }
    }

    /// Check whether `resource_type` is a base resource for this provider.
    pub fn is_base(&self, resource_type: &str) -> bool {
        self.base_resources().contains(&resource_type)
    }

    /// Environment variables the provider block reads credentials from.
    pub fn credential_keys(&self) -> &'static [&'static str] {
        match self {
            CloudProvider::Aws => &["AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY"],
            CloudProvider::Azure => &[
                "ARM_SUBSCRIPTION_ID",
                "ARM_TENANT_ID",
                "ARM_CLIENT_ID",
                "ARM_CLIENT_SECRET",
            ],
            CloudProvider::Gcp => &["GCP_PROJECT_ID", "GOOGLE_APPLICATION_CREDENTIALS"],
        }
    }
}

impl FromStr for CloudProvider {
    type Err = IacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| IacError::UnsupportedProvider(s.to_string()))
    }
}

impl std::fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
