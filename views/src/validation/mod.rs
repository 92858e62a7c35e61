//! Declarative form validation.
//!
//! Each form is described as a list of rules per field. A field reports the
//! first rule it breaks; later rules for that field are not checked.

mod client;
mod credentials;
mod project;

pub use client::validate_new_client;
pub use credentials::validate_credentials;
pub use project::validate_new_project;

use regex::Regex;
use shared_types::ValidationErrors;

/// A single constraint on a string field
pub(crate) enum Rule<'a> {
    Required(&'a str),
    MinChars(usize, &'a str),
    MaxChars(usize, &'a str),
    Matches(&'a Regex, &'a str),
}

impl Rule<'_> {
    fn check(&self, value: &str) -> Result<(), String> {
        let ok = match self {
            Rule::Required(_) => !value.is_empty(),
            Rule::MinChars(min, _) => value.chars().count() >= *min,
            Rule::MaxChars(max, _) => value.chars().count() <= *max,
            Rule::Matches(regex, _) => regex.is_match(value),
        };
        if ok {
            Ok(())
        } else {
            Err(self.message().to_string())
        }
    }

    fn message(&self) -> &str {
        match self {
            Rule::Required(message)
            | Rule::MinChars(_, message)
            | Rule::MaxChars(_, message)
            | Rule::Matches(_, message) => message,
        }
    }
}

/// Run `rules` against `value` in order and record the first failure on `field`
pub(crate) fn check_field(errors: &mut ValidationErrors, field: &str, value: &str, rules: &[Rule]) {
    for rule in rules {
        if let Err(message) = rule.check(value) {
            errors.add(field, message);
            return;
        }
    }
}

/// Treat an empty optional string as absent
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Trimmed, non-blank entries of a repeated input
pub(crate) fn non_blank_entries(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_failing_rule_is_reported() {
        let digits = Regex::new(r"^\d+$").unwrap();
        let mut errors = ValidationErrors::new();
        check_field(
            &mut errors,
            "zip",
            "ab",
            &[
                Rule::MinChars(5, "too short"),
                Rule::Matches(&digits, "digits only"),
            ],
        );
        assert_eq!(errors.get("zip"), Some("too short"));
    }

    #[test]
    fn test_length_counts_characters() {
        let mut errors = ValidationErrors::new();
        check_field(&mut errors, "name", "ÉÉ", &[Rule::MaxChars(2, "too long")]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_blank_entries_are_dropped() {
        let values = vec!["  Ana ".to_string(), "".to_string(), "   ".to_string()];
        assert_eq!(non_blank_entries(&values), vec!["Ana".to_string()]);
    }
}
