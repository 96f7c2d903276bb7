//! Orchestration for `fieldcheck check`.
//!
//! Loads the rule set and the value snapshot, then validates either a single
//! field or the whole form against that one snapshot.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::core::orchestrator::{FormSummary, Outcomes, summarize, validate_all, validate_one};
use crate::core::registry::Registry;
use crate::core::types::FieldValues;
use crate::exit_codes;
use crate::io::rules_file::load_rules;
use crate::io::values::{apply_assignments, load_values};

/// Inputs for one check run.
#[derive(Debug, Clone, Copy)]
pub struct CheckRequest<'a> {
    pub rules_path: &'a Path,
    /// Optional JSON values file; `assignments` are applied on top of it.
    pub values_path: Option<&'a Path>,
    /// Raw `KEY=VALUE` strings.
    pub assignments: &'a [String],
    /// Validate only this field instead of the whole form.
    pub field: Option<&'a str>,
}

/// Structured result of a check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub outcomes: Outcomes,
    pub summary: FormSummary,
}

impl CheckReport {
    pub fn exit_code(&self) -> i32 {
        if self.summary.is_valid() {
            exit_codes::OK
        } else {
            exit_codes::INVALID
        }
    }
}

/// Load rules and values from disk and run the check.
pub fn run_check(request: &CheckRequest<'_>) -> Result<CheckReport> {
    let registry = load_rules(request.rules_path).context("load rules")?;
    let mut values = match request.values_path {
        Some(path) => load_values(path).context("load values")?,
        None => FieldValues::new(),
    };
    apply_assignments(&mut values, request.assignments).context("apply --set values")?;
    debug!(
        rules = registry.len(),
        values = values.len(),
        field = request.field.unwrap_or("*"),
        "running check"
    );
    Ok(check_values(&registry, &values, request.field))
}

/// Validate one field (`Some`) or every registered field (`None`).
pub fn check_values(registry: &Registry, values: &FieldValues, field: Option<&str>) -> CheckReport {
    let outcomes = match field {
        Some(field_id) => {
            if !registry.contains(field_id) {
                warn!(field_id, "field has no rules, reporting it as valid");
            }
            Outcomes::from([(
                field_id.to_string(),
                validate_one(registry, field_id, values),
            )])
        }
        None => validate_all(registry, values),
    };
    let summary = summarize(&outcomes);
    CheckReport { outcomes, summary }
}
