//! Custom Tera filters for emitting HCL.
//!
//! Resolved fields mix literal values (names, CIDR blocks) with reference
//! expressions such as `aws_subnet.app.id`. HCL wants the former quoted and
//! the latter bare, so templates pick the filter that matches the field.

use std::collections::HashMap;

use serde_json::Value;
use tera::Tera;

/// Register every infragen filter on a Tera instance.
pub fn register(tera: &mut Tera) {
    tera.register_filter("hcl_list", hcl_list);
    tera.register_filter("hcl_string", hcl_string);
}

/// Render a list as an HCL list of bare expressions.
///
/// `["aws_security_group.web.id"]` becomes `[aws_security_group.web.id]`.
/// A scalar is treated as a one-element list. Unresolved (empty) entries
/// stay as `""` so the list remains valid HCL.
pub fn hcl_list(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let items: Vec<String> = match value {
        Value::Array(items) => items.iter().map(list_item).collect(),
        Value::Null => Vec::new(),
        other => vec![list_item(other)],
    };
    Ok(Value::String(format!("[{}]", items.join(", "))))
}

/// Render a value as a quoted, escaped HCL string literal.
pub fn hcl_string(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let escaped = bare(value)
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace("${", "$${")
        .replace("%{", "%%{");
    Ok(Value::String(format!("\"{}\"", escaped)))
}

fn list_item(value: &Value) -> String {
    match bare(value) {
        item if item.is_empty() => "\"\"".to_string(),
        item => item,
    }
}

fn bare(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
