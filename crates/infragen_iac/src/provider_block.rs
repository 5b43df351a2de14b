//! Provider authentication blocks.

use crate::credentials::Credentials;
use crate::error::IacResult;
use crate::provider::CloudProvider;

/// Emits the `provider "<name>" { ... }` header of a generated file.
pub struct ProviderBlock;

impl ProviderBlock {
    /// Render the block for a provider given by name.
    ///
    /// Fails with `UnsupportedProvider` for unknown names. Missing credentials
    /// are rendered as empty strings.
    pub fn emit(provider: &str, region: &str, credentials: &Credentials) -> IacResult<String> {
        let provider: CloudProvider = provider.parse()?;
        Ok(Self::render(provider, region, credentials))
    }

    /// Render the block for a known provider.
    pub fn render(provider: CloudProvider, region: &str, credentials: &Credentials) -> String {
        match provider {
            CloudProvider::Aws => format!(
                r#"provider "aws" {{
  region     = "{region}"
  access_key = "{access_key}"
  secret_key = "{secret_key}"
}}"#,
                region = region,
                access_key = credentials.get("AWS_ACCESS_KEY_ID"),
                secret_key = credentials.get("AWS_SECRET_ACCESS_KEY"),
            ),
            // azurerm takes its location per resource, so the region is unused here.
            CloudProvider::Azure => format!(
                r#"provider "azurerm" {{
  features {{}}
  subscription_id = "{subscription_id}"
  tenant_id       = "{tenant_id}"
  client_id       = "{client_id}"
  client_secret   = "{client_secret}"
}}"#,
                subscription_id = credentials.get("ARM_SUBSCRIPTION_ID"),
                tenant_id = credentials.get("ARM_TENANT_ID"),
                client_id = credentials.get("ARM_CLIENT_ID"),
                client_secret = credentials.get("ARM_CLIENT_SECRET"),
            ),
            CloudProvider::Gcp => format!(
                r#"provider "google" {{
  region  = "{region}"
  project = "{project}"
  credentials = "{credentials}"
}}"#,
                region = region,
                project = credentials.get("GCP_PROJECT_ID"),
                credentials = credentials.get("GOOGLE_APPLICATION_CREDENTIALS"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IacError;

    #[test]
    fn test_aws_block() {
        let creds = Credentials::from_pairs([
            ("AWS_ACCESS_KEY_ID", "AKIA123"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
        ]);
        let block = ProviderBlock::emit("aws", "us-west-2", &creds).unwrap();

        assert_eq!(
            block,
            "provider \"aws\" {\n  region     = \"us-west-2\"\n  access_key = \"AKIA123\"\n  secret_key = \"secret\"\n}"
        );
    }

    #[test]
    fn test_missing_credentials_render_empty() {
        let block = ProviderBlock::emit("google", "europe-west1", &Credentials::empty()).unwrap();

        assert!(block.contains("region  = \"europe-west1\""));
        assert!(block.contains("project = \"\""));
        assert!(block.contains("credentials = \"\""));
    }

    #[test]
    fn test_azure_ignores_region() {
        let creds = Credentials::from_pairs([("ARM_TENANT_ID", "t-1")]);
        let block = ProviderBlock::emit("azurerm", "westeurope", &creds).unwrap();

        assert!(block.starts_with("provider \"azurerm\" {\n  features {}\n"));
        assert!(block.contains("tenant_id       = \"t-1\""));
        assert!(block.contains("client_secret   = \"\""));
        assert!(!block.contains("westeurope"));
    }

    #[test]
    fn test_unsupported_provider() {
        let err = ProviderBlock::emit("digitalocean", "nyc1", &Credentials::empty()).unwrap_err();
        assert!(matches!(err, IacError::UnsupportedProvider(ref p) if p == "digitalocean"));
    }
}
