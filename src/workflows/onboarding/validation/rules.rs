use once_cell::sync::Lazy;
use regex::Regex;

use super::super::domain::FormRecord;

pub(crate) static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s.,&'-]+$").expect("name pattern compiles"));
pub(crate) static LOCATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9\s.,&'-]+$").expect("location pattern compiles"));
pub(crate) static ZIP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,10}$").expect("zip pattern compiles"));
pub(crate) static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));
// E.164 shape: leading +, country code, 7-15 digits total.
pub(crate) static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{6,14}$").expect("phone pattern compiles"));
pub(crate) static LETTERS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("letters pattern compiles"));

/// A pure check against a single field of the record.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Text answer must be present (untrimmed, mirroring the radio groups).
    Required { message: &'static str },
    /// Text answer must contain something other than whitespace.
    NonBlank { message: &'static str },
    /// Non-empty text must fully match the pattern; empty text passes and is
    /// left to a `Required`/`NonBlank` check on the same field.
    Matches {
        pattern: &'static Lazy<Regex>,
        message: &'static str,
    },
    /// Multi-select set must have at least one option ticked.
    AtLeastOne { message: &'static str },
}

impl Rule {
    pub(crate) fn check(&self, record: &FormRecord, field: &'static str) -> Option<&'static str> {
        match self {
            Rule::Required { message } => record.text(field).is_empty().then_some(*message),
            Rule::NonBlank { message } => record.text(field).trim().is_empty().then_some(*message),
            Rule::Matches { pattern, message } => {
                let value = record.text(field);
                (!value.is_empty() && !pattern.is_match(value)).then_some(*message)
            }
            Rule::AtLeastOne { message } => record.selection(field).is_empty().then_some(*message),
        }
    }
}

/// Gate deciding whether a check applies at all. A conditional sub-field is
/// skipped entirely, regardless of its current value, while its trigger is
/// absent.
#[derive(Debug, Clone, Copy)]
pub enum Condition {
    Equals {
        field: &'static str,
        value: &'static str,
    },
    Selected {
        field: &'static str,
        option: &'static str,
    },
}

impl Condition {
    pub(crate) fn holds(&self, record: &FormRecord) -> bool {
        match self {
            Condition::Equals { field, value } => record.text(field) == *value,
            Condition::Selected { field, option } => record.selected(field, option),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::onboarding::domain::{fields, FormPatch, FormRecord};

    #[test]
    fn matches_passes_empty_values_through() {
        let record = FormRecord::template();
        let rule = Rule::Matches {
            pattern: &ZIP_PATTERN,
            message: "digits only",
        };
        assert_eq!(rule.check(&record, fields::ZIP_CODE), None);
    }

    #[test]
    fn phone_pattern_requires_e164_shape() {
        assert!(PHONE_PATTERN.is_match("+9779812345678"));
        assert!(PHONE_PATTERN.is_match("+15555550123"));
        assert!(!PHONE_PATTERN.is_match("9812345678"));
        assert!(!PHONE_PATTERN.is_match("+0123"));
    }

    #[test]
    fn non_blank_rejects_whitespace_only() {
        let mut record = FormRecord::template();
        record.apply(FormPatch::new().text(fields::OTHER_VOICE, "   "));
        let rule = Rule::NonBlank { message: "blank" };
        assert_eq!(rule.check(&record, fields::OTHER_VOICE), Some("blank"));
    }

    #[test]
    fn selected_condition_reads_the_option_set() {
        let mut record = FormRecord::template();
        record.apply(FormPatch::new().selection(fields::SELECTED_GOALS, ["Others"]));
        let condition = Condition::Selected {
            field: fields::SELECTED_GOALS,
            option: "Others",
        };
        assert!(condition.holds(&record));
    }
}
