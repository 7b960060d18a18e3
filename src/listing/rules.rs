//! Validation rules and the error map they produce

use super::field::{FieldPath, FieldValue};
use super::form_state::FormState;
use super::validators;
use std::collections::BTreeMap;

/// Predicate over a field's current value
pub type Predicate = fn(&FieldValue<'_>) -> bool;

/// Whether a rule applies to the current state at all
pub type Relevance = fn(&FormState) -> bool;

/// A predicate and message bound to one field.
///
/// `optional` rules are skipped when the value is empty. Rules whose
/// `relevant_when` returns false are skipped regardless of `optional`.
#[derive(Debug, Clone)]
pub struct ValidationRule {
    pub field: FieldPath,
    pub validate: Predicate,
    pub message: String,
    pub optional: bool,
    pub relevant_when: Option<Relevance>,
}

impl ValidationRule {
    pub fn new(field: FieldPath, validate: Predicate, message: impl Into<String>) -> Self {
        Self {
            field,
            validate,
            message: message.into(),
            optional: false,
            relevant_when: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn relevant_when(mut self, relevance: Relevance) -> Self {
        self.relevant_when = Some(relevance);
        self
    }

    /// `None` when the rule passes or is skipped, the message otherwise
    pub fn check(&self, state: &FormState) -> Option<&str> {
        if let Some(relevant) = self.relevant_when {
            if !relevant(state) {
                return None;
            }
        }
        let value = self.field.read(state);
        if self.optional && value.is_empty() {
            return None;
        }
        if (self.validate)(&value) {
            None
        } else {
            Some(&self.message)
        }
    }
}

/// Field path to message. Rebuilt from scratch on every validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    errors: BTreeMap<FieldPath, String>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure. The first message recorded for a field wins.
    pub fn insert(&mut self, field: FieldPath, message: impl Into<String>) -> bool {
        if self.errors.contains_key(&field) {
            return false;
        }
        self.errors.insert(field, message.into());
        true
    }

    pub fn get(&self, field: FieldPath) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Message shown next to an editable field, resolving hour parts to
    /// their day
    pub fn message_for(&self, field: FieldPath) -> Option<&str> {
        self.get(field.error_key())
    }

    pub fn contains(&self, field: FieldPath) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldPath, &str)> {
        self.errors.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn extend(&mut self, other: ErrorMap) {
        for (field, message) in other.errors {
            self.insert(field, message);
        }
    }

    /// Errors keyed by dotted path, for logging and export
    pub fn to_dotted(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|(k, v)| (k.path(), v.clone()))
            .collect()
    }
}

/// Run `rules` against `state`, first failing rule per field wins
pub fn run_rules(rules: &[ValidationRule], state: &FormState) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for rule in rules {
        if errors.contains(rule.field) {
            continue;
        }
        if let Some(message) = rule.check(state) {
            errors.insert(rule.field, message);
        }
    }
    errors
}

// Predicates over field values, built on the string validators.

pub fn required(value: &FieldValue<'_>) -> bool {
    !value.is_empty()
}

pub fn email(value: &FieldValue<'_>) -> bool {
    validators::is_email(value.as_text())
}

pub fn phone(value: &FieldValue<'_>) -> bool {
    validators::is_phone(value.as_text())
}

pub fn url(value: &FieldValue<'_>) -> bool {
    validators::is_url(value.as_text())
}

pub fn name_length(value: &FieldValue<'_>) -> bool {
    validators::is_length_in_range(value.as_text(), 2, 80)
}

pub fn description_length(value: &FieldValue<'_>) -> bool {
    validators::is_length_in_range(value.as_text(), 20, 1000)
}

pub fn area_length(value: &FieldValue<'_>) -> bool {
    validators::is_length_in_range(value.as_text(), 2, 120)
}

pub fn license_shape(value: &FieldValue<'_>) -> bool {
    validators::is_length_in_range(value.as_text(), 4, 40)
}

pub fn years(value: &FieldValue<'_>) -> bool {
    validators::is_whole_number(value.as_text(), 200)
}

pub fn all_urls(value: &FieldValue<'_>) -> bool {
    value
        .as_items()
        .iter()
        .filter(|item| validators::is_non_empty(item))
        .all(|item| validators::is_url(item))
}

pub fn flag_set(value: &FieldValue<'_>) -> bool {
    matches!(value, FieldValue::Flag(true))
}

/// Closed days always pass; open days need two valid times with close after open
pub fn day_hours(value: &FieldValue<'_>) -> bool {
    match value {
        FieldValue::Hours(hours) if hours.closed => true,
        FieldValue::Hours(hours) => {
            match (
                validators::parse_time(&hours.open),
                validators::parse_time(&hours.close),
            ) {
                (Some(open), Some(close)) => close > open,
                _ => false,
            }
        }
        _ => false,
    }
}

// Relevance predicates.

pub fn books_online(state: &FormState) -> bool {
    state
        .service_data
        .as_ref()
        .is_some_and(|s| s.books_online())
}

pub fn delivers(state: &FormState) -> bool {
    state
        .product_data
        .as_ref()
        .is_some_and(|p| p.offers_delivery())
}
