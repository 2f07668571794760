//! Model validation and the "now valid" transition.
//!
//! # Responsibility
//! - Turn a model into an ordered field -> message set.
//! - Track whether a model was never validated, validated clean, or invalid.
//!
//! # Invariants
//! - Validation never fails; an empty [`ErrorSet`] means valid.
//! - Field order in an [`ErrorSet`] is insertion order, so joined messages
//!   follow the order rules were evaluated in.

mod coverage;
mod domain;
mod party;

pub use coverage::{
    validate_geo_coverage, COORDINATE_MISSING_MESSAGE, COORDINATE_PAIR_MESSAGE,
    DESCRIPTION_MESSAGE, EAST_MESSAGE, NORTH_MESSAGE, SOUTH_MESSAGE, WEST_MESSAGE,
};
pub use domain::{
    validate_non_numeric_domain, CHOOSE_DOMAIN_MESSAGE, CODE_PAIR_MESSAGE,
    ENTITY_CODE_LIST_MESSAGE, EXTERNAL_CODE_SET_MESSAGE, NO_CODES_MESSAGE,
    TEXT_DEFINITION_MESSAGE,
};
pub use party::{validate_party, EMAIL_MESSAGE, NAME_MESSAGE, SUR_NAME_MESSAGE};

pub use crate::model::coverage::validate_coordinate;

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered mapping of field name -> user-facing message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorSet {
    errors: Vec<FieldError>,
}

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message for `field`, keeping the field's first position.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.errors.iter_mut().find(|error| error.field == field) {
            Some(existing) => existing.message = message,
            None => self.errors.push(FieldError {
                field: field.to_string(),
                message,
            }),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|error| error.field.as_str())
    }

    /// All messages joined by a single space.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|error| error.message.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Display for ErrorSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Last validation outcome recorded for a model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationState {
    #[default]
    NotValidated,
    Valid,
    Invalid(ErrorSet),
}

/// What a validation run means to a caller decorating fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationEvent {
    /// Clean now, and was not known clean before; clear error decoration.
    BecameValid,
    /// Clean now and before.
    StillValid,
    Invalid(ErrorSet),
}

impl ValidationEvent {
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid(_))
    }
}

/// Remembers the last outcome so clean runs can be told apart from
/// "never validated".
#[derive(Debug, Clone, Default)]
pub struct ValidationTracker {
    state: ValidationState,
}

impl ValidationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ValidationState {
        &self.state
    }

    /// Records the outcome of one validation run.
    pub fn record(&mut self, errors: ErrorSet) -> ValidationEvent {
        if errors.is_empty() {
            let was_valid = self.state == ValidationState::Valid;
            self.state = ValidationState::Valid;
            debug!("event=validation module=validate status=ok was_valid={was_valid}");
            if was_valid {
                ValidationEvent::StillValid
            } else {
                ValidationEvent::BecameValid
            }
        } else {
            debug!(
                "event=validation module=validate status=error fields={}",
                errors.len()
            );
            self.state = ValidationState::Invalid(errors.clone());
            ValidationEvent::Invalid(errors)
        }
    }

    /// Forgets the last outcome.
    pub fn reset(&mut self) {
        self.state = ValidationState::NotValidated;
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorSet, ValidationEvent, ValidationState, ValidationTracker};

    #[test]
    fn insert_replaces_message_in_place() {
        let mut errors = ErrorSet::new();
        errors.insert("a", "first");
        errors.insert("b", "second");
        errors.insert("a", "replaced");

        assert_eq!(errors.fields().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(errors.get("a"), Some("replaced"));
        assert_eq!(errors.summary(), "replaced second");
        assert_eq!(errors.to_string(), "replaced second");
    }

    #[test]
    fn tracker_distinguishes_first_clean_run() {
        let mut tracker = ValidationTracker::new();
        assert_eq!(tracker.state(), &ValidationState::NotValidated);

        assert_eq!(tracker.record(ErrorSet::new()), ValidationEvent::BecameValid);
        assert_eq!(tracker.record(ErrorSet::new()), ValidationEvent::StillValid);

        let mut errors = ErrorSet::new();
        errors.insert("definition", "missing");
        assert!(!tracker.record(errors).is_valid());
        assert_eq!(tracker.record(ErrorSet::new()), ValidationEvent::BecameValid);

        tracker.reset();
        assert_eq!(tracker.state(), &ValidationState::NotValidated);
    }

    #[test]
    fn error_set_serializes_as_ordered_list() {
        let mut errors = ErrorSet::new();
        errors.insert("north", "bad");
        let json = serde_json::to_value(&errors).expect("serialize");
        assert_eq!(json, serde_json::json!([{ "field": "north", "message": "bad" }]));
    }
}
