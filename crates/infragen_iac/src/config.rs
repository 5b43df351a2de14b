//! Generation configuration.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IacError, IacResult};
use crate::provider::CloudProvider;
use crate::resource::ResourceDeclaration;

/// What to generate: one provider, an optional region and its resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Terraform provider name (`aws`, `azurerm` or `google`).
    pub provider: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub resources: Vec<ResourceDeclaration>,
}

impl GenerationConfig {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            region: String::new(),
            resources: Vec::new(),
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_resource(mut self, resource: ResourceDeclaration) -> Self {
        self.resources.push(resource);
        self
    }

    /// Load a configuration file. `.yaml` and `.yml` are read as YAML, anything else as JSON.
    pub fn from_file(path: &Path) -> IacResult<Self> {
        debug!("Loading generation config from {:?}", path);
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Err(IacError::InvalidConfig(format!(
                "{} is empty",
                path.display()
            )));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    pub fn from_json_str(content: &str) -> IacResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> IacResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// The provider, or `UnsupportedProvider`.
    pub fn cloud_provider(&self) -> IacResult<CloudProvider> {
        self.provider.parse()
    }

    /// Non-fatal problems worth reporting before running `terraform`.
    pub fn lint(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (index, resource) in self.resources.iter().enumerate() {
            let name = resource.name();
            if !is_terraform_identifier(name) {
                warnings.push(format!(
                    "resource #{} ({}) name {:?} is not a valid Terraform identifier",
                    index + 1,
                    resource.resource_type(),
                    name
                ));
            }
        }

        let mut seen = HashSet::new();
        for resource in &self.resources {
            let key = (resource.resource_type(), resource.name());
            if !seen.insert(key) {
                warnings.push(format!(
                    "duplicate resource {} {:?}",
                    resource.resource_type(),
                    resource.name()
                ));
            }
        }

        warnings
    }
}

/// Terraform block labels: a letter or underscore, then letters, digits, `_` or `-`.
pub fn is_terraform_identifier(name: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").ok())
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const JSON: &str = r#"{
        "provider": "aws",
        "region": "us-east-1",
        "resources": [
            {"type": "vpc", "name": "main", "cidr_block": "10.0.0.0/16"},
            {"type": "subnet", "name": "app", "vpc_name": "main"}
        ]
    }"#;

    #[test]
    fn test_parse_json() {
        let config = GenerationConfig::from_json_str(JSON).unwrap();
        assert_eq!(config.provider, "aws");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.resources.len(), 2);
        assert_eq!(config.resources[1].get_str("vpc_name"), Some("main"));
        assert_eq!(config.cloud_provider().unwrap(), CloudProvider::Aws);
    }

    #[test]
    fn test_region_defaults_empty() {
        let config = GenerationConfig::from_json_str(r#"{"provider": "google", "resources": []}"#).unwrap();
        assert_eq!(config.region, "");
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = "provider: azurerm\nresources:\n  - type: resource_group\n    name: rg\n    location: westeurope\n";
        let config = GenerationConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.provider, "azurerm");
        assert_eq!(config.resources[0].get_str("location"), Some("westeurope"));
    }

    #[test]
    fn test_resource_without_type_rejected() {
        let err = GenerationConfig::from_json_str(r#"{"provider": "aws", "resources": [{"name": "x"}]}"#)
            .unwrap_err();
        assert!(matches!(err, IacError::Json(_)));
    }

    #[test]
    fn test_unknown_provider_parses_but_does_not_resolve() {
        let config = GenerationConfig::from_json_str(r#"{"provider": "oracle"}"#).unwrap();
        assert!(matches!(
            config.cloud_provider(),
            Err(IacError::UnsupportedProvider(_))
        ));
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = tempdir().unwrap();
        let json_path = dir.path().join("config.json");
        let yaml_path = dir.path().join("config.yml");
        fs::write(&json_path, JSON).unwrap();
        fs::write(&yaml_path, "provider: google\nregion: us-central1\n").unwrap();

        let json = GenerationConfig::from_file(&json_path).unwrap();
        let yaml = GenerationConfig::from_file(&yaml_path).unwrap();

        assert_eq!(json.resources.len(), 2);
        assert_eq!(yaml.region, "us-central1");
        assert!(yaml.resources.is_empty());
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempdir().unwrap();
        let err = GenerationConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, IacError::Io(_)));
    }

    #[test]
    fn test_from_file_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "\n  \n").unwrap();

        let err = GenerationConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, IacError::InvalidConfig(ref msg) if msg.ends_with("is empty")));
    }

    #[test]
    fn test_identifier_rules() {
        assert!(is_terraform_identifier("main"));
        assert!(is_terraform_identifier("allow-ssh"));
        assert!(is_terraform_identifier("_private"));
        assert!(!is_terraform_identifier("1st"));
        assert!(!is_terraform_identifier("web server"));
        assert!(!is_terraform_identifier(""));
    }

    #[test]
    fn test_lint_reports_bad_and_duplicate_names() {
        let config = GenerationConfig::new("aws")
            .with_resource(ResourceDeclaration::new("vpc", "main"))
            .with_resource(ResourceDeclaration::new("vpc", "main"))
            .with_resource(ResourceDeclaration::new("instance", "web server"));

        let warnings = config.lint();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| w.contains("\"web server\"")));
        assert!(warnings.iter().any(|w| w.contains("duplicate resource vpc")));
    }
}
