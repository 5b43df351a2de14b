//! Resource declarations as read from a configuration file.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One declared resource: a free-form field mapping with a required `type`.
///
/// Resolvers add or overwrite fields before rendering; nothing removes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ResourceDeclaration {
    fields: Map<String, Value>,
}

impl ResourceDeclaration {
    /// Create a declaration with a `type` and a `name`.
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self::of_type(resource_type).with_field("name", name.into())
    }

    /// Create a declaration with only a `type`; its name defaults to the type.
    pub fn of_type(resource_type: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("type".to_string(), Value::String(resource_type.into()));
        Self { fields }
    }

    /// Builder-style field setter.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// The resource kind, e.g. `vpc` or `compute_instance`.
    pub fn resource_type(&self) -> &str {
        self.fields
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// The declared name, falling back to the resource type.
    pub fn name(&self) -> &str {
        self.get_str("name").unwrap_or_else(|| self.resource_type())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// A field's value if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// A field's value if it is a non-empty string.
    pub fn non_empty_str(&self, key: &str) -> Option<&str> {
        self.get_str(key).filter(|s| !s.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Insert or overwrite a field. `type` is never replaced.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        if key == "type" {
            return;
        }
        let value = normalize_field(&key, value.into());
        self.fields.insert(key, value);
    }

    /// All fields, in the form handed to templates.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl TryFrom<Map<String, Value>> for ResourceDeclaration {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        match fields.get("type") {
            Some(Value::String(t)) if !t.is_empty() => Ok(Self {
                fields: fields
                    .into_iter()
                    .map(|(key, value)| {
                        let value = normalize_field(&key, value);
                        (key, value)
                    })
                    .collect(),
            }),
            Some(_) => Err("resource field `type` must be a non-empty string".to_string()),
            None => Err("resource is missing required field `type`".to_string()),
        }
    }
}

/// `name` and `*_name` fields end up inside reference expressions, so numeric
/// and boolean values (`name: 2024` in YAML) are stored as their text.
fn normalize_field(key: &str, value: Value) -> Value {
    let is_name = key == "name" || key.ends_with("_name");
    match value {
        Value::Number(_) | Value::Bool(_) if is_name => Value::String(value.to_string()),
        other => other,
    }
}

impl From<ResourceDeclaration> for Map<String, Value> {
    fn from(resource: ResourceDeclaration) -> Self {
        resource.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_name_defaults_to_type() {
        let resource = ResourceDeclaration::of_type("vpc");
        assert_eq!(resource.name(), "vpc");

        let named = ResourceDeclaration::new("vpc", "main");
        assert_eq!(named.name(), "main");
    }

    #[test]
    fn test_scalar_names_are_text() {
        let resource: ResourceDeclaration = serde_json::from_value(json!({
            "type": "subnet",
            "name": 2024,
            "vpc_name": 7,
            "map_public_ip_on_launch": true,
            "cidr_block": "10.0.1.0/24"
        }))
        .unwrap();

        assert_eq!(resource.name(), "2024");
        assert_eq!(resource.non_empty_str("vpc_name"), Some("7"));
        assert_eq!(resource.get("map_public_ip_on_launch"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_set_scalar_name_is_text() {
        let resource = ResourceDeclaration::of_type("instance")
            .with_field("subnet_name", 42)
            .with_field("count", 2);

        assert_eq!(resource.get_str("subnet_name"), Some("42"));
        assert_eq!(resource.get("count"), Some(&json!(2)));
    }

    #[test]
    fn test_null_name_falls_back_to_type() {
        let resource: ResourceDeclaration =
            serde_json::from_value(json!({"type": "vpc", "name": null})).unwrap();
        assert_eq!(resource.name(), "vpc");
    }

    #[test]
    fn test_deserialize_requires_type() {
        let err = serde_json::from_value::<ResourceDeclaration>(json!({"name": "main"})).unwrap_err();
        assert!(err.to_string().contains("missing required field `type`"));

        let err = serde_json::from_value::<ResourceDeclaration>(json!({"type": 3})).unwrap_err();
        assert!(err.to_string().contains("non-empty string"));
    }

    #[test]
    fn test_set_never_replaces_type() {
        let mut resource = ResourceDeclaration::new("subnet", "app");
        resource.set("type", "vpc");
        resource.set("vpc_name", "main");

        assert_eq!(resource.resource_type(), "subnet");
        assert_eq!(resource.get_str("vpc_name"), Some("main"));
    }

    #[test]
    fn test_serialize_is_flat_mapping() {
        let resource = ResourceDeclaration::new("vpc", "main").with_field("cidr_block", "10.0.0.0/16");
        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(
            value,
            json!({"type": "vpc", "name": "main", "cidr_block": "10.0.0.0/16"})
        );
    }

    #[test]
    fn test_non_empty_str() {
        let resource = ResourceDeclaration::new("instance", "web").with_field("subnet_name", "");
        assert_eq!(resource.non_empty_str("subnet_name"), None);
        assert_eq!(resource.non_empty_str("name"), Some("web"));
    }
}
