//! Presentation of validation results.
//!
//! The core returns plain outcomes; this module decides how a field looks.
//! [`FieldState`] models the per-field lifecycle a form UI tracks
//! (`Untouched -> Validating -> Valid | Invalid`, re-entered on every edit),
//! and the `render_*` functions turn results into terminal output.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use crate::check::CheckReport;
use crate::core::orchestrator::FormSummary;
use crate::core::registry::Registry;
use crate::core::types::{Rule, ValidationOutcome};

/// Visual state of one field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    #[default]
    Untouched,
    Validating,
    Valid,
    Invalid,
}

impl FieldState {
    /// The value changed; every state re-enters `Validating`.
    pub fn begin(self) -> Self {
        FieldState::Validating
    }

    /// Apply an outcome. Only a `Validating` field settles; a stale outcome
    /// arriving in any other state is ignored.
    pub fn settle(self, outcome: &ValidationOutcome) -> Self {
        match self {
            FieldState::Validating if outcome.valid => FieldState::Valid,
            FieldState::Validating => FieldState::Invalid,
            other => other,
        }
    }

    /// State of a field that was just edited and checked.
    pub fn checked(outcome: &ValidationOutcome) -> Self {
        FieldState::Untouched.begin().settle(outcome)
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldState::Untouched => "untouched",
            FieldState::Validating => "validating",
            FieldState::Valid => "valid",
            FieldState::Invalid => "invalid",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

pub fn render_report(report: &CheckReport, format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(render_text(report)),
        Format::Json => render_json(report),
    }
}

/// One line per field, then a summary line.
///
/// ```text
/// valid   email
/// invalid age: Age must be between 13 and 120
/// summary: fields=2 valid=1 invalid=1
/// ```
pub fn render_text(report: &CheckReport) -> String {
    let mut out = String::new();
    for (field_id, outcome) in &report.outcomes {
        let state = FieldState::checked(outcome);
        if outcome.valid {
            out.push_str(&format!("{:<7} {}\n", state.label(), field_id));
        } else {
            out.push_str(&format!(
                "{:<7} {}: {}\n",
                state.label(),
                field_id,
                outcome.message
            ));
        }
    }
    out.push_str(&format!(
        "summary: fields={} valid={} invalid={}\n",
        report.summary.total, report.summary.valid, report.summary.invalid
    ));
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    fields: BTreeMap<&'a str, JsonField<'a>>,
    summary: &'a FormSummary,
}

#[derive(Serialize)]
struct JsonField<'a> {
    state: FieldState,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rule: Option<Rule>,
}

pub fn render_json(report: &CheckReport) -> Result<String> {
    let fields = report
        .outcomes
        .iter()
        .map(|(field_id, outcome)| {
            let field = JsonField {
                state: FieldState::checked(outcome),
                message: (!outcome.message.is_empty()).then_some(outcome.message.as_str()),
                rule: outcome.failed_rule,
            };
            (field_id.as_str(), field)
        })
        .collect();
    let payload = JsonReport {
        fields,
        summary: &report.summary,
    };
    let mut out = serde_json::to_string_pretty(&payload).context("serialize report json")?;
    out.push('\n');
    Ok(out)
}

/// Field listing for `fieldcheck rules`.
pub fn render_rules(registry: &Registry) -> String {
    let mut out = format!("rules: fields={}\n", registry.len());
    for (field_id, spec) in registry.iter() {
        let checks = spec
            .declared_rules()
            .iter()
            .map(|rule| rule.label())
            .collect::<Vec<_>>()
            .join(",");
        let checks = if checks.is_empty() { "none".to_string() } else { checks };
        out.push_str(&format!("field: {} checks={}\n", field_id, checks));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::check_values;
    use crate::forms::signup_form;
    use crate::test_support::{signup_values, values};

    #[test]
    fn state_transitions() {
        let ok = ValidationOutcome::valid("email");
        let bad = ValidationOutcome::invalid("email", Rule::Pattern, "bad".to_string());

        let state = FieldState::default();
        assert_eq!(state, FieldState::Untouched);
        let state = state.begin();
        assert_eq!(state, FieldState::Validating);
        let state = state.settle(&bad);
        assert_eq!(state, FieldState::Invalid);
        // Re-entrant: an edit after a verdict validates again.
        let state = state.begin().settle(&ok);
        assert_eq!(state, FieldState::Valid);
    }

    #[test]
    fn settle_ignores_outcome_when_not_validating() {
        let bad = ValidationOutcome::invalid("email", Rule::Pattern, "bad".to_string());
        assert_eq!(FieldState::Untouched.settle(&bad), FieldState::Untouched);
        assert_eq!(FieldState::Valid.settle(&bad), FieldState::Valid);
    }

    #[test]
    fn text_report_lists_fields_and_summary() {
        let registry = signup_form().expect("form");
        let report = check_values(
            &registry,
            &values(&[("age", "12"), ("email", "ada@example.com")]),
            None,
        );
        let text = render_text(&report);
        assert!(text.contains("invalid age: Age must be between 13 and 120\n"));
        assert!(text.contains("valid   email\n"));
        assert!(text.contains("valid   website\n"));
        assert!(text.ends_with("summary: fields=8 valid=2 invalid=6\n"));
    }

    #[test]
    fn json_report_shape() {
        let registry = signup_form().expect("form");
        let mut snapshot = signup_values();
        snapshot.insert("phone".to_string(), "abc".to_string());
        let report = check_values(&registry, &snapshot, None);
        let json = render_report(&report, Format::Json).expect("json");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed["fields"]["phone"]["state"], "invalid");
        assert_eq!(parsed["fields"]["phone"]["rule"], "pattern");
        assert_eq!(
            parsed["fields"]["phone"]["message"],
            "Please enter a valid phone number"
        );
        assert_eq!(parsed["fields"]["email"]["state"], "valid");
        assert!(parsed["fields"]["email"].get("message").is_none());
        assert_eq!(parsed["summary"]["invalid"], 1);
        assert_eq!(parsed["summary"]["first_invalid"], "phone");
    }

    #[test]
    fn rules_listing() {
        let registry = signup_form().expect("form");
        let text = render_rules(&registry);
        assert!(text.starts_with("rules: fields=8\n"));
        assert!(text.contains("field: age checks=required,range\n"));
        assert!(text.contains("field: confirmPassword checks=required,match_field\n"));
        assert!(text.contains("field: website checks=pattern\n"));
    }
}
