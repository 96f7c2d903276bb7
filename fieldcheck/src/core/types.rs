//! Shared deterministic types for the validation core.
//!
//! These types define the contract between the registry, the validator and
//! whatever presents the results. They carry no I/O and compare by value.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::registry::ConfigurationError;

/// Raw field values keyed by field identifier, captured by the caller.
///
/// A field missing from the map is treated as an empty value.
pub type FieldValues = BTreeMap<String, String>;

/// Message reported for an empty required field when no override is set.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Individual checks of a constraint spec, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Required,
    Length,
    Pattern,
    Range,
    MatchField,
}

impl Rule {
    pub fn label(self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Length => "length",
            Rule::Pattern => "pattern",
            Rule::Range => "range",
            Rule::MatchField => "match_field",
        }
    }

    /// Fallback text when a spec has neither a rule override nor a `message`.
    fn default_message(self) -> &'static str {
        match self {
            Rule::Required => REQUIRED_MESSAGE,
            Rule::Length => "Value has an invalid length",
            Rule::Pattern => "Value has an invalid format",
            Rule::Range => "Value is out of range",
            Rule::MatchField => "Values do not match",
        }
    }
}

/// Regular expression that must match the whole trimmed value.
///
/// The source text is kept for display and serialization; matching uses an
/// anchored copy so `abc` never accepts `xabcx`.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    anchored: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, ConfigurationError> {
        let anchored = Regex::new(&format!("^(?:{source})$")).map_err(|err| {
            ConfigurationError::InvalidPattern {
                pattern: source.to_string(),
                source: err,
            }
        })?;
        Ok(Self {
            source: source.to_string(),
            anchored,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_full_match(&self, value: &str) -> bool {
        self.anchored.is_match(value)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Pattern::new(&source).map_err(serde::de::Error::custom)
    }
}

/// Per-rule failure messages that take precedence over `ConstraintSpec::message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleMessages {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(alias = "matchField", skip_serializing_if = "Option::is_none")]
    pub match_field: Option<String>,
}

impl RuleMessages {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn get(&self, rule: Rule) -> Option<&str> {
        match rule {
            Rule::Required => self.required.as_deref(),
            Rule::Length => self.length.as_deref(),
            Rule::Pattern => self.pattern.as_deref(),
            Rule::Range => self.range.as_deref(),
            Rule::MatchField => self.match_field.as_deref(),
        }
    }
}

/// Declarative constraints for one field.
///
/// Every present check is enforced; absent checks are skipped. Construct with
/// [`ConstraintSpec::new`] and the `with_*` helpers, or deserialize from a
/// rules file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConstraintSpec {
    pub required: bool,
    #[serde(alias = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(alias = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Pattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Identifier of another field whose value this one must equal.
    #[serde(alias = "matchField", skip_serializing_if = "Option::is_none")]
    pub match_field: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "RuleMessages::is_empty")]
    pub messages: RuleMessages,
}

impl ConstraintSpec {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn with_pattern(mut self, source: &str) -> Result<Self, ConfigurationError> {
        self.pattern = Some(Pattern::new(source)?);
        Ok(self)
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_match_field(mut self, field_id: impl Into<String>) -> Self {
        self.match_field = Some(field_id.into());
        self
    }

    pub fn with_messages(mut self, messages: RuleMessages) -> Self {
        self.messages = messages;
        self
    }

    /// Checks this spec declares, in evaluation order.
    pub fn declared_rules(&self) -> Vec<Rule> {
        let mut rules = Vec::new();
        if self.required {
            rules.push(Rule::Required);
        }
        if self.min_length.is_some() || self.max_length.is_some() {
            rules.push(Rule::Length);
        }
        if self.pattern.is_some() {
            rules.push(Rule::Pattern);
        }
        if self.min.is_some() || self.max.is_some() {
            rules.push(Rule::Range);
        }
        if self.match_field.is_some() {
            rules.push(Rule::MatchField);
        }
        rules
    }

    /// Failure message for `rule`: per-rule override, then `message`.
    ///
    /// `required` never falls back to `message`; an empty required field gets
    /// [`REQUIRED_MESSAGE`] unless `messages.required` is set.
    pub fn message_for(&self, rule: Rule) -> String {
        if let Some(message) = self.messages.get(rule) {
            return message.to_string();
        }
        if rule != Rule::Required && !self.message.is_empty() {
            return self.message.clone();
        }
        rule.default_message().to_string()
    }
}

/// Verdict for one field from one validation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub field_id: String,
    pub valid: bool,
    /// Empty when `valid` is true.
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_rule: Option<Rule>,
}

impl ValidationOutcome {
    pub fn valid(field_id: &str) -> Self {
        Self {
            field_id: field_id.to_string(),
            valid: true,
            message: String::new(),
            failed_rule: None,
        }
    }

    pub fn invalid(field_id: &str, rule: Rule, message: String) -> Self {
        Self {
            field_id: field_id.to_string(),
            valid: false,
            message,
            failed_rule: Some(rule),
        }
    }
}
