//! Built-in rule sets.
//!
//! The sign-up form is the default rule set used when no rules file exists.

use std::collections::BTreeMap;

use crate::core::registry::{ConfigurationError, Registry};
use crate::core::types::ConstraintSpec;

const FULL_NAME_PATTERN: &str = r"[a-zA-Z\s]+";
const EMAIL_PATTERN: &str = r"[^\s@]+@[^\s@]+\.[^\s@]+";
const PHONE_PATTERN: &str = r"\+?[1-9]\d{0,15}";
/// At least one lowercase letter, one uppercase letter and one digit, in any
/// order (the regex engine has no lookahead).
const PASSWORD_PATTERN: &str = concat!(
    r"(?:.*[a-z].*[A-Z].*\d|.*[a-z].*\d.*[A-Z]",
    r"|.*[A-Z].*[a-z].*\d|.*[A-Z].*\d.*[a-z]",
    r"|.*\d.*[a-z].*[A-Z]|.*\d.*[A-Z].*[a-z]).*"
);
const WEBSITE_PATTERN: &str = r"(?:https?://)?(?:[\w-]+\.)+[\w-]+(?:/[\w\-._~:/?#\[\]@!$&'()*+,;=]*)?";

/// Constraint specs of the sign-up form, keyed by field id.
pub fn signup_specs() -> Result<BTreeMap<String, ConstraintSpec>, ConfigurationError> {
    let specs = [
        (
            "fullName",
            ConstraintSpec::new("Please enter your full name (at least 2 characters, letters only)")
                .with_required()
                .with_min_length(2)
                .with_pattern(FULL_NAME_PATTERN)?,
        ),
        (
            "email",
            ConstraintSpec::new("Please enter a valid email address")
                .with_required()
                .with_pattern(EMAIL_PATTERN)?,
        ),
        (
            "phone",
            ConstraintSpec::new("Please enter a valid phone number")
                .with_required()
                .with_pattern(PHONE_PATTERN)?,
        ),
        (
            "age",
            ConstraintSpec::new("Age must be between 13 and 120")
                .with_required()
                .with_range(Some(13.0), Some(120.0)),
        ),
        (
            "country",
            ConstraintSpec::new("Please select a country").with_required(),
        ),
        (
            "password",
            ConstraintSpec::new(
                "Password must be at least 8 characters with uppercase, lowercase, and number",
            )
            .with_required()
            .with_min_length(8)
            .with_pattern(PASSWORD_PATTERN)?,
        ),
        (
            "confirmPassword",
            ConstraintSpec::new("Passwords do not match")
                .with_required()
                .with_match_field("password"),
        ),
        (
            "website",
            ConstraintSpec::new("Please enter a valid URL").with_pattern(WEBSITE_PATTERN)?,
        ),
    ];
    Ok(specs
        .into_iter()
        .map(|(field_id, spec)| (field_id.to_string(), spec))
        .collect())
}

/// Registry for the sign-up form.
pub fn signup_form() -> Result<Registry, ConfigurationError> {
    Registry::load(signup_specs()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Rule;
    use crate::core::validator::evaluate;
    use crate::test_support::values;

    fn failed_rule(field_id: &str, raw: &str) -> Option<Rule> {
        let registry = signup_form().expect("form");
        evaluate(&registry, field_id, &values(&[(field_id, raw)])).failed_rule
    }

    #[test]
    fn signup_form_loads() {
        let registry = signup_form().expect("form");
        let ids: Vec<&str> = registry.field_ids().collect();
        assert_eq!(
            ids,
            vec![
                "age",
                "confirmPassword",
                "country",
                "email",
                "fullName",
                "password",
                "phone",
                "website"
            ]
        );
    }

    #[test]
    fn full_name_rules() {
        assert_eq!(failed_rule("fullName", "Ada Lovelace"), None);
        assert_eq!(failed_rule("fullName", "A"), Some(Rule::Length));
        assert_eq!(failed_rule("fullName", "R2 D2"), Some(Rule::Pattern));
    }

    #[test]
    fn email_rules() {
        assert_eq!(failed_rule("email", "ada@example.com"), None);
        assert_eq!(failed_rule("email", "ada@example"), Some(Rule::Pattern));
        assert_eq!(failed_rule("email", "ada lovelace@example.com"), Some(Rule::Pattern));
    }

    #[test]
    fn phone_rules() {
        assert_eq!(failed_rule("phone", "+14155550100"), None);
        assert_eq!(failed_rule("phone", "4155550100"), None);
        assert_eq!(failed_rule("phone", "0415"), Some(Rule::Pattern));
        assert_eq!(failed_rule("phone", "+1234567890123456789"), Some(Rule::Pattern));
    }

    #[test]
    fn password_needs_mixed_case_and_digit() {
        assert_eq!(failed_rule("password", "Abcdef12"), None);
        assert_eq!(failed_rule("password", "12abcDEF"), None);
        assert_eq!(failed_rule("password", "Abc12"), Some(Rule::Length));
        assert_eq!(failed_rule("password", "abcdefgh1"), Some(Rule::Pattern));
        assert_eq!(failed_rule("password", "ABCDEFGH1"), Some(Rule::Pattern));
        assert_eq!(failed_rule("password", "Abcdefghi"), Some(Rule::Pattern));
    }

    #[test]
    fn website_is_optional_but_checked_when_present() {
        assert_eq!(failed_rule("website", ""), None);
        assert_eq!(failed_rule("website", "example.com"), None);
        assert_eq!(failed_rule("website", "https://example.com/docs?page=1#top"), None);
        assert_eq!(failed_rule("website", "not a url"), Some(Rule::Pattern));
    }

    #[test]
    fn country_only_requires_a_value() {
        assert_eq!(failed_rule("country", "nz"), None);
        assert_eq!(failed_rule("country", ""), Some(Rule::Required));
    }
}
