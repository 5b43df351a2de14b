//! Provider credentials injected into the provider block.

use std::collections::HashMap;

use tracing::debug;

use crate::provider::CloudProvider;

/// Read-only credential lookup. Absent keys read as the empty string.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    values: HashMap<String, String>,
}

impl Credentials {
    /// No credentials at all; every provider block gets empty values.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Capture every known provider credential from the process environment.
    pub fn from_env() -> Self {
        let mut values = HashMap::new();
        for provider in CloudProvider::all() {
            for key in provider.credential_keys() {
                if let Ok(value) = std::env::var(key) {
                    values.insert(key.to_string(), value);
                }
            }
        }
        debug!("Captured {} credential value(s) from environment", values.len());
        Self { values }
    }

    /// Build credentials from explicit key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Value for `key`, or `""` if absent.
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("Credentials")
            .field("keys", &keys)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_key_is_empty() {
        let creds = Credentials::empty();
        assert_eq!(creds.get("AWS_ACCESS_KEY_ID"), "");
        assert!(!creds.contains("AWS_ACCESS_KEY_ID"));
    }

    #[test]
    fn test_from_pairs() {
        let creds = Credentials::from_pairs([("ARM_TENANT_ID", "tenant")]).with("ARM_CLIENT_ID", "client");
        assert_eq!(creds.get("ARM_TENANT_ID"), "tenant");
        assert_eq!(creds.get("ARM_CLIENT_ID"), "client");
    }

    #[test]
    fn test_debug_redacts_values() {
        let creds = Credentials::from_pairs([("AWS_SECRET_ACCESS_KEY", "hunter2")]);
        let debug = format!("{:?}", creds);
        assert!(debug.contains("AWS_SECRET_ACCESS_KEY"));
        assert!(!debug.contains("hunter2"));
    }
}
