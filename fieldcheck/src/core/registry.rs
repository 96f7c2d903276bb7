//! Immutable table of constraint specs keyed by field identifier.
//!
//! A [`Registry`] is built once, checked against the rule set invariants, and
//! never mutated afterwards. It is `Send + Sync`; share it by reference or
//! behind an `Arc`.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use thiserror::Error;

use crate::core::invariants::validate_invariants;
use crate::core::types::ConstraintSpec;

/// Rule set rejected before any value is validated.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
    #[error("rule set violations:\n- {}", .violations.join("\n- "))]
    Violations { violations: Vec<String> },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    specs: BTreeMap<String, ConstraintSpec>,
}

impl Registry {
    /// Build a registry, failing on duplicate ids or any invariant violation.
    ///
    /// All violations are reported together, in field id order.
    pub fn load<I, K>(specs: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (K, ConstraintSpec)>,
        K: Into<String>,
    {
        let mut table: BTreeMap<String, ConstraintSpec> = BTreeMap::new();
        let mut violations = Vec::new();
        for (field_id, spec) in specs {
            match table.entry(field_id.into()) {
                Entry::Vacant(slot) => {
                    slot.insert(spec);
                }
                Entry::Occupied(slot) => {
                    violations.push(format!("{}: duplicate field id", slot.key()));
                }
            }
        }
        violations.extend(validate_invariants(&table));
        if !violations.is_empty() {
            return Err(ConfigurationError::Violations { violations });
        }
        Ok(Self { specs: table })
    }

    pub fn get(&self, field_id: &str) -> Option<&ConstraintSpec> {
        self.specs.get(field_id)
    }

    pub fn contains(&self, field_id: &str) -> bool {
        self.specs.contains_key(field_id)
    }

    /// Registered field ids in lexicographic order.
    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConstraintSpec)> {
        self.specs.iter().map(|(id, spec)| (id.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
