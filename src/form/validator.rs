//! Field validation. Pure and synchronous: a verdict depends only on the field
//! definition, the value read from the surface and, for confirmations, the
//! paired value read at the same moment.

use super::field::{Field, FieldKind, FieldValue};
use crate::config::DEFAULT_MIN_PASSWORD_LENGTH;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const MSG_REQUIRED: &str = "This field is required";
pub const MSG_INVALID_EMAIL: &str = "Enter a valid email address";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const MSG_SELECT_OPTION: &str = "Please select an option";
pub const MSG_ACCEPT_TERMS: &str = "You must agree to the terms";
/// Shown when the destination flags a field without a readable message.
pub const MSG_INVALID_VALUE: &str = "Invalid value";

static EMAIL_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Tunable validation rules, taken from the engine configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rules {
    pub min_password_length: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}

/// Outcome of validating one field at one point in time.
/// An invalid verdict always carries a non-empty message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Verdict {
    valid: bool,
    message: String,
}

impl Verdict {
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        let message = message.into();
        debug_assert!(!message.is_empty());
        Self {
            valid: false,
            message,
        }
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[must_use]
pub fn password_length_message(min: usize) -> String {
    format!("Password must be at least {min} characters")
}

/// Basic `local@domain.tld` shape check.
#[must_use]
pub fn valid_email(value: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value))
}

/// Validates one field. `related` is the current value of the paired field for
/// confirmations and is ignored otherwise.
#[must_use]
pub fn validate(
    field: &Field,
    value: &FieldValue,
    related: Option<&FieldValue>,
    rules: &Rules,
) -> Verdict {
    if field.is_checkbox() {
        return if field.required && !value.is_checked() {
            Verdict::invalid(MSG_ACCEPT_TERMS)
        } else {
            Verdict::valid()
        };
    }

    let text = value.text();
    if text.trim().is_empty() {
        return if field.required {
            Verdict::invalid(MSG_REQUIRED)
        } else {
            Verdict::valid()
        };
    }

    match &field.kind {
        FieldKind::Email if !valid_email(text) => Verdict::invalid(MSG_INVALID_EMAIL),
        FieldKind::Password if text.chars().count() < rules.min_password_length => {
            Verdict::invalid(password_length_message(rules.min_password_length))
        }
        FieldKind::PasswordConfirmation { .. }
            if related.map_or("", FieldValue::text) != text =>
        {
            Verdict::invalid(MSG_PASSWORD_MISMATCH)
        }
        FieldKind::SingleSelect { options }
            if !options.is_empty() && !options.iter().any(|option| option == text) =>
        {
            Verdict::invalid(MSG_SELECT_OPTION)
        }
        _ => Verdict::valid(),
    }
}
