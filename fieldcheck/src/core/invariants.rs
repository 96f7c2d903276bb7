//! Semantic invariants of a rule set not expressible via the rules file schema.

use std::collections::BTreeMap;

use crate::core::types::ConstraintSpec;

/// Check semantic invariants of a rule set:
/// - Field ids are non-empty and contain no whitespace
/// - `min_length <= max_length`
/// - `min`/`max` are finite and `min <= max`
/// - `match_field` names another registered field
///
/// Returns stable error messages in field id order (empty on success).
pub fn validate_invariants(specs: &BTreeMap<String, ConstraintSpec>) -> Vec<String> {
    let mut errors = Vec::new();
    for (field_id, spec) in specs {
        validate_spec(field_id, spec, specs, &mut errors);
    }
    errors
}

fn validate_spec(
    field_id: &str,
    spec: &ConstraintSpec,
    specs: &BTreeMap<String, ConstraintSpec>,
    errors: &mut Vec<String>,
) {
    if field_id.is_empty() || field_id.chars().any(char::is_whitespace) {
        errors.push(format!(
            "{:?}: field id must be non-empty and contain no whitespace",
            field_id
        ));
    }

    if let (Some(min), Some(max)) = (spec.min_length, spec.max_length) {
        if min > max {
            errors.push(format!(
                "{}: min_length {} exceeds max_length {}",
                field_id, min, max
            ));
        }
    }

    for (label, bound) in [("min", spec.min), ("max", spec.max)] {
        if bound.is_some_and(|value| !value.is_finite()) {
            errors.push(format!("{}: {} must be a finite number", field_id, label));
        }
    }

    if let (Some(min), Some(max)) = (spec.min, spec.max) {
        if min > max {
            errors.push(format!("{}: min {} exceeds max {}", field_id, min, max));
        }
    }

    if let Some(target) = spec.match_field.as_deref() {
        if target == field_id {
            errors.push(format!("{}: match_field must name another field", field_id));
        } else if !specs.contains_key(target) {
            errors.push(format!(
                "{}: match_field references unknown field '{}'",
                field_id, target
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spec_map;

    #[test]
    fn accepts_consistent_rule_set() {
        let specs = spec_map(vec![
            ("password", ConstraintSpec::new("pw").with_required()),
            (
                "confirmPassword",
                ConstraintSpec::new("mismatch").with_match_field("password"),
            ),
        ]);
        assert!(validate_invariants(&specs).is_empty());
    }

    #[test]
    fn reports_unknown_match_field() {
        let specs = spec_map(vec![(
            "confirmPassword",
            ConstraintSpec::new("mismatch").with_match_field("password"),
        )]);
        assert_eq!(
            validate_invariants(&specs),
            vec!["confirmPassword: match_field references unknown field 'password'".to_string()]
        );
    }

    #[test]
    fn reports_self_match() {
        let specs = spec_map(vec![(
            "email",
            ConstraintSpec::new("m").with_match_field("email"),
        )]);
        assert_eq!(
            validate_invariants(&specs),
            vec!["email: match_field must name another field".to_string()]
        );
    }

    #[test]
    fn reports_inverted_bounds() {
        let specs = spec_map(vec![(
            "age",
            ConstraintSpec::new("m")
                .with_min_length(5)
                .with_max_length(2)
                .with_range(Some(120.0), Some(13.0)),
        )]);
        let errors = validate_invariants(&specs);
        assert!(errors.iter().any(|err| err.contains("min_length 5 exceeds max_length 2")));
        assert!(errors.iter().any(|err| err.contains("min 120 exceeds max 13")));
    }

    #[test]
    fn reports_non_finite_bounds() {
        let specs = spec_map(vec![(
            "score",
            ConstraintSpec::new("m").with_range(Some(f64::NAN), Some(f64::INFINITY)),
        )]);
        let errors = validate_invariants(&specs);
        assert!(errors.contains(&"score: min must be a finite number".to_string()));
        assert!(errors.contains(&"score: max must be a finite number".to_string()));
    }

    #[test]
    fn reports_malformed_field_ids() {
        let specs = spec_map(vec![
            ("", ConstraintSpec::new("m")),
            ("first name", ConstraintSpec::new("m")),
        ]);
        let errors = validate_invariants(&specs);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|err| err.contains("field id must be non-empty")));
    }
}
