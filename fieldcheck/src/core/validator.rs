//! Evaluation of one field against its constraint spec.
//!
//! Checks run in a fixed order and stop at the first failure:
//! `required`, length bounds, `pattern`, numeric range, `match_field`.
//! Values are trimmed before every check. An empty optional field passes
//! without running the remaining checks.

use crate::core::registry::Registry;
use crate::core::types::{ConstraintSpec, FieldValues, Rule, ValidationOutcome};

/// Evaluate `field_id` against its spec using the `values` snapshot.
///
/// Fields without a registered spec are valid.
pub fn evaluate(registry: &Registry, field_id: &str, values: &FieldValues) -> ValidationOutcome {
    let Some(spec) = registry.get(field_id) else {
        return ValidationOutcome::valid(field_id);
    };
    match first_failure(spec, field_id, values) {
        Some(rule) => ValidationOutcome::invalid(field_id, rule, spec.message_for(rule)),
        None => ValidationOutcome::valid(field_id),
    }
}

fn first_failure(spec: &ConstraintSpec, field_id: &str, values: &FieldValues) -> Option<Rule> {
    let value = trimmed(values, field_id);
    if value.is_empty() {
        return spec.required.then_some(Rule::Required);
    }
    if !within_length(spec, value) {
        return Some(Rule::Length);
    }
    if spec
        .pattern
        .as_ref()
        .is_some_and(|pattern| !pattern.is_full_match(value))
    {
        return Some(Rule::Pattern);
    }
    if !within_range(spec, value) {
        return Some(Rule::Range);
    }
    if spec
        .match_field
        .as_deref()
        .is_some_and(|other| trimmed(values, other) != value)
    {
        return Some(Rule::MatchField);
    }
    None
}

/// Strips whitespace and U+FEFF (byte order mark) from both ends.
fn trimmed<'a>(values: &'a FieldValues, field_id: &str) -> &'a str {
    values.get(field_id).map_or("", |value| {
        value.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
    })
}

/// Length is counted in chars, not bytes.
fn within_length(spec: &ConstraintSpec, value: &str) -> bool {
    if spec.min_length.is_none() && spec.max_length.is_none() {
        return true;
    }
    let len = value.chars().count();
    spec.min_length.is_none_or(|min| len >= min) && spec.max_length.is_none_or(|max| len <= max)
}

fn within_range(spec: &ConstraintSpec, value: &str) -> bool {
    if spec.min.is_none() && spec.max.is_none() {
        return true;
    }
    let number = match value.parse::<f64>() {
        Ok(number) if number.is_finite() => number,
        _ => return false,
    };
    spec.min.is_none_or(|min| number >= min) && spec.max.is_none_or(|max| number <= max)
}
