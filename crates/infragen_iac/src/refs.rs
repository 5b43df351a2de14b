//! Run-scoped table of generated cross-resource references.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

/// Attribute name → generated value for one category.
pub type Attributes = BTreeMap<String, String>;

static EMPTY: Attributes = BTreeMap::new();

/// Build a reference expression `<kind>.<name>.<attribute>`.
pub fn reference(kind: &str, name: &str, attribute: &str) -> String {
    format!("{}.{}.{}", kind, name, attribute)
}

/// Category → attributes generated by the most recent resource of that category.
///
/// A category holds one entry: registering a second resource of the same
/// category replaces the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceTable {
    entries: BTreeMap<String, Attributes>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the attributes for `category`.
    pub fn set<K, V, I>(&mut self, category: impl Into<String>, attributes: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let category = category.into();
        let attributes: Attributes = attributes
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        if let Some(previous) = self.entries.insert(category.clone(), attributes) {
            debug!(
                "Overwrote reference for category {} (previous: {:?})",
                category, previous
            );
        } else {
            debug!("Registered reference for category {}", category);
        }
    }

    /// Attributes for `category`, or an empty mapping if none were registered.
    pub fn get(&self, category: &str) -> &Attributes {
        self.entries.get(category).unwrap_or(&EMPTY)
    }

    /// A single attribute of `category`, if registered.
    pub fn attribute(&self, category: &str, attribute: &str) -> Option<&str> {
        self.get(category).get(attribute).map(String::as_str)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.entries.contains_key(category)
    }

    /// Registered categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
