//! Field value snapshots read from JSON files and `KEY=VALUE` overrides.
//!
//! A values file is a flat JSON object. Strings are taken as-is; numbers and
//! booleans are converted to their JSON text; `null` is an empty value.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;
use tracing::warn;

use crate::core::types::FieldValues;

/// Load a snapshot from a JSON object file.
pub fn load_values(path: &Path) -> Result<FieldValues> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_values(&contents).with_context(|| format!("parse values {}", path.display()))
}

pub fn parse_values(contents: &str) -> Result<FieldValues> {
    let document: Value = serde_json::from_str(contents).context("parse values json")?;
    let Value::Object(entries) = document else {
        bail!("values must be a JSON object of field id to value");
    };
    entries
        .into_iter()
        .map(|(field_id, value)| {
            let raw = raw_value(&field_id, value)?;
            Ok((field_id, raw))
        })
        .collect()
}

fn raw_value(field_id: &str, value: Value) -> Result<String> {
    match value {
        Value::String(raw) => Ok(raw),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => Err(anyhow!(
            "value for '{field_id}' must be a string, number, boolean or null"
        )),
    }
}

/// Parse a `KEY=VALUE` assignment. The value may be empty or contain `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    let (field_id, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got '{raw}'"))?;
    let field_id = field_id.trim();
    if field_id.is_empty() {
        bail!("missing field id in '{raw}'");
    }
    Ok((field_id.to_string(), value.to_string()))
}

/// Apply `KEY=VALUE` assignments on top of `values`, later ones winning.
pub fn apply_assignments(values: &mut FieldValues, assignments: &[String]) -> Result<()> {
    for raw in assignments {
        let (field_id, value) = parse_assignment(raw)?;
        if let Some(previous) = values.insert(field_id.clone(), value) {
            warn!(field_id = %field_id, previous = %previous, "--set overrides an existing value");
        }
    }
    Ok(())
}
