//! Reusable field validators
//!
//! These validators are composed into [`RuleSet`](super::RuleSet)s. Each one
//! ignores values of a kind it does not understand; the patch engine has
//! already guaranteed that field values carry their declared kind.

use crate::core::error::{Rule, Violation};
use crate::core::field::FieldValue;
use chrono::NaiveDate;
use regex::Regex;

/// Validator: field is present (not null, not an empty string)
pub fn required() -> impl Fn(&str, &FieldValue) -> Result<(), Violation> + Send + Sync + Clone {
    |field: &str, value: &FieldValue| match value {
        FieldValue::Null => Err(Violation::new(field, Rule::Required, "value is required")),
        FieldValue::String(s) if s.is_empty() => {
            Err(Violation::new(field, Rule::Required, "value must not be empty"))
        }
        _ => Ok(()),
    }
}

/// Validator: number must be zero or greater (NaN is rejected)
pub fn non_negative() -> impl Fn(&str, &FieldValue) -> Result<(), Violation> + Send + Sync + Clone
{
    |field: &str, value: &FieldValue| match value.as_number() {
        Some(num) if num.is_nan() || num < 0.0 => Err(Violation::new(
            field,
            Rule::NonNegative,
            format!("must be zero or greater (value: {})", num),
        )),
        _ => Ok(()),
    }
}

/// Validator: string must match the pattern
pub fn matches_pattern(
    pattern: Regex,
) -> impl Fn(&str, &FieldValue) -> Result<(), Violation> + Send + Sync + Clone {
    move |field: &str, value: &FieldValue| match value.as_string() {
        Some(s) if !pattern.is_match(s) => Err(Violation::new(
            field,
            Rule::Pattern,
            format!("'{}' does not match {}", s, pattern.as_str()),
        )),
        _ => Ok(()),
    }
}

/// Validator: date must not be earlier than `today()`
///
/// `today` is read on every call, so a long-lived validator keeps tracking
/// the calendar.
pub fn not_before(
    today: fn() -> NaiveDate,
) -> impl Fn(&str, &FieldValue) -> Result<(), Violation> + Send + Sync + Clone {
    move |field: &str, value: &FieldValue| match value.as_date() {
        Some(date) if date < today() => Err(Violation::new(
            field,
            Rule::NotInPast,
            format!("{} is in the past", date.format("%Y-%m-%d")),
        )),
        _ => Ok(()),
    }
}
