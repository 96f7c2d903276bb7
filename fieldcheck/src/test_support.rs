//! Test-only helpers for building rule sets and value snapshots.

use std::collections::BTreeMap;

use crate::core::types::{ConstraintSpec, FieldValues};

/// Build a value snapshot from `(field_id, raw)` pairs.
pub fn values(pairs: &[(&str, &str)]) -> FieldValues {
    pairs
        .iter()
        .map(|(field_id, raw)| (field_id.to_string(), raw.to_string()))
        .collect()
}

/// Build a spec table without going through the registry invariants.
pub fn spec_map(specs: Vec<(&str, ConstraintSpec)>) -> BTreeMap<String, ConstraintSpec> {
    specs
        .into_iter()
        .map(|(field_id, spec)| (field_id.to_string(), spec))
        .collect()
}

/// A sign-up snapshot that passes every built-in rule.
pub fn signup_values() -> FieldValues {
    values(&[
        ("fullName", "Ada Lovelace"),
        ("email", "ada@example.com"),
        ("phone", "+14155550100"),
        ("age", "36"),
        ("country", "uk"),
        ("password", "Abcdef12"),
        ("confirmPassword", "Abcdef12"),
        ("website", "https://example.com"),
    ])
}
