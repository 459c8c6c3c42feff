//! Helpers for reading loosely-typed YAML values.
//!
//! Specification files are schemaless; these helpers perform the small amount
//! of coercion the compiler needs (default substitution, key lookup) without
//! attempting any semantic type checking.

use serde_yaml::{Mapping, Value};

/// Look up a string key in a mapping.
pub fn lookup<'a>(mapping: &'a Mapping, key: &str) -> Option<&'a Value> {
    mapping.get(key)
}

/// Render a scalar as a string. Returns `None` for null, sequences and mappings.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Read `key` from `mapping` as a string, falling back to `default` when the
/// key is absent or not a scalar.
pub fn string_or(mapping: &Mapping, key: &str, default: &str) -> String {
    lookup(mapping, key)
        .and_then(scalar_to_string)
        .unwrap_or_else(|| default.to_string())
}
