//! Validation of one field or a whole form against a single snapshot.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::registry::Registry;
use crate::core::types::{FieldValues, ValidationOutcome};
use crate::core::validator::evaluate;

/// Outcomes keyed by field id, in lexicographic order.
pub type Outcomes = BTreeMap<String, ValidationOutcome>;

/// Validate a single field, typically on live input.
pub fn validate_one(registry: &Registry, field_id: &str, values: &FieldValues) -> ValidationOutcome {
    evaluate(registry, field_id, values)
}

/// Validate every registered field against the same `values` snapshot.
///
/// Returns exactly one outcome per registered field.
pub fn validate_all(registry: &Registry, values: &FieldValues) -> Outcomes {
    registry
        .field_ids()
        .map(|field_id| (field_id.to_string(), evaluate(registry, field_id, values)))
        .collect()
}

/// Form-level tally used to decide whether a form would submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    /// Lexicographically first invalid field id, if any.
    pub first_invalid: Option<String>,
}

impl FormSummary {
    pub fn is_valid(&self) -> bool {
        self.invalid == 0
    }
}

pub fn summarize(outcomes: &Outcomes) -> FormSummary {
    let mut summary = FormSummary {
        total: outcomes.len(),
        ..FormSummary::default()
    };
    for (field_id, outcome) in outcomes {
        if outcome.valid {
            summary.valid += 1;
            continue;
        }
        summary.invalid += 1;
        if summary.first_invalid.is_none() {
            summary.first_invalid = Some(field_id.clone());
        }
    }
    summary
}
