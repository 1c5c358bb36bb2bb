use crate::data::{Draft, FieldValue, FormMode};
use email_address::EmailAddress;
use std::collections::BTreeMap;

pub const REQUIRED_MESSAGE: &str = "This field is required.";

///Per-field messages. Empty means the draft may be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors<F: Ord>(BTreeMap<F, &'static str>);

impl<F: Ord> Default for ValidationErrors<F> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<F: Ord + Copy> ValidationErrors<F> {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: F) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn set(&mut self, field: F, message: &'static str) {
        self.0.insert(field, message);
    }
}

fn only_digits(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit())
}

///Checks run in order and later ones overwrite earlier messages on the same field.
pub fn validate<D: Draft>(draft: &D, mode: &FormMode) -> ValidationErrors<D::Field> {
    let mut errors = ValidationErrors::default();

    for field in D::REQUIRED {
        if draft.value(*field).is_blank() {
            errors.set(*field, REQUIRED_MESSAGE);
        }
    }

    if mode.is_create() {
        for (field, message) in D::CREATE_ONLY {
            if draft.value(*field).is_blank() {
                errors.set(*field, message);
            }
        }
    }

    for (field, message) in D::EMAIL {
        let value = draft.value(*field);
        let malformed = value
            .as_text()
            .filter(|_| !value.is_blank())
            .is_some_and(|text| !EmailAddress::is_valid(text.trim()));
        if malformed {
            errors.set(*field, message);
        }
    }

    for (field, message) in D::DIGITS_ONLY {
        //a whitespace-only value is both missing and malformed, the format message wins
        if let FieldValue::Text(text) = draft.value(*field) {
            if !text.is_empty() && !only_digits(text) {
                errors.set(*field, message);
            }
        }
    }

    errors
}
