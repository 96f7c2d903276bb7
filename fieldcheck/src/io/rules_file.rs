//! Rule set documents stored as TOML (`fieldcheck.toml` by default).
//!
//! Loading is two-phase, like any hand-edited document we accept: the TOML is
//! first checked against the embedded JSON Schema (unknown keys, wrong types),
//! then turned into a [`Registry`], which enforces the semantic invariants.
//!
//! ```toml
//! [fields.password]
//! required = true
//! min_length = 8
//! message = "Password must be at least 8 characters"
//!
//! [fields.confirmPassword]
//! required = true
//! match_field = "password"
//! message = "Passwords do not match"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use jsonschema::Draft;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::registry::Registry;
use crate::core::types::ConstraintSpec;
use crate::forms::signup_form;

pub const DEFAULT_RULES_PATH: &str = "fieldcheck.toml";

const V1_SCHEMA: &str = include_str!("../../schemas/rules/v1.schema.json");

/// On-disk shape of a rule set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesFile {
    pub fields: BTreeMap<String, ConstraintSpec>,
}

impl RulesFile {
    pub fn from_registry(registry: &Registry) -> Self {
        Self {
            fields: registry
                .iter()
                .map(|(field_id, spec)| (field_id.to_string(), spec.clone()))
                .collect(),
        }
    }
}

/// Load a rule set from a TOML file.
///
/// If the file is missing, returns the built-in sign-up form.
pub fn load_rules(path: &Path) -> Result<Registry> {
    if !path.exists() {
        debug!(path = %path.display(), "rules file missing, using built-in signup form");
        return signup_form().context("build built-in signup form");
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let registry = parse_rules(&contents).with_context(|| format!("load {}", path.display()))?;
    debug!(path = %path.display(), fields = registry.len(), "rules loaded");
    Ok(registry)
}

/// Parse and check a TOML rule set: schema conformance + invariants.
pub fn parse_rules(contents: &str) -> Result<Registry> {
    let document: Value = toml::from_str(contents).context("parse rules toml")?;
    validate_schema(&document)?;
    let file: RulesFile = serde_json::from_value(document).context("deserialize rules")?;
    let registry = Registry::load(file.fields)?;
    Ok(registry)
}

/// Atomically write a rule set to disk (temp file + rename).
pub fn write_rules(path: &Path, registry: &Registry) -> Result<()> {
    let mut buf =
        toml::to_string_pretty(&RulesFile::from_registry(registry)).context("serialize rules toml")?;
    if !buf.ends_with('\n') {
        buf.push('\n');
    }
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp rules {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace rules {}", path.display()))?;
    Ok(())
}

/// Validate the rules document against the v1 JSON Schema (Draft 2020-12).
fn validate_schema(document: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(V1_SCHEMA).context("parse rules schema")?;
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .context("compile rules schema")?;
    let messages: Vec<String> = compiled
        .iter_errors(document)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        bail!("rules schema validation failed:\n- {}", messages.join("\n- "));
    }
    Ok(())
}
