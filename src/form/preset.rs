//! Form definitions for the two authentication pages.

use super::field::{Field, FieldId, FieldKind};
use crate::error::{Error, Result};

pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const PASSWORD_CONFIRMATION: &str = "password_confirmation";
pub const UNIVERSE: &str = "uni";
pub const REMEMBER: &str = "remember";
pub const TERMS: &str = "terms";

/// Static description of one form: its fields in display order, hidden
/// pass-through inputs, and the submit control labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormSpec {
    pub name: String,
    pub fields: Vec<Field>,
    pub hidden: Vec<(String, String)>,
    /// Whether the password strength indicator is rendered.
    pub strength_meter: bool,
    pub submit_label: String,
    pub loading_label: String,
}

impl FormSpec {
    /// Login: email, password, universe and an optional "remember me".
    #[must_use]
    pub fn login(universes: &[&str]) -> Self {
        Self {
            name: "login".to_string(),
            fields: vec![
                Field::required(EMAIL, FieldKind::Email),
                Field::required(PASSWORD, FieldKind::Password),
                Field::required(UNIVERSE, universe_kind(universes)),
                Field::optional(REMEMBER, FieldKind::Checkbox),
            ],
            hidden: Vec::new(),
            strength_meter: false,
            submit_label: "Sign In".to_string(),
            loading_label: "Signing In...".to_string(),
        }
    }

    /// Registration: email, password with confirmation, universe and terms.
    #[must_use]
    pub fn register(universes: &[&str]) -> Self {
        Self {
            name: "register".to_string(),
            fields: vec![
                Field::required(EMAIL, FieldKind::Email),
                Field::required(PASSWORD, FieldKind::Password),
                Field::required(
                    PASSWORD_CONFIRMATION,
                    FieldKind::PasswordConfirmation {
                        pair: FieldId::new(PASSWORD),
                    },
                ),
                Field::required(UNIVERSE, universe_kind(universes)),
                Field::required(TERMS, FieldKind::Checkbox),
            ],
            hidden: [("v", "3"), ("step", "validate"), ("errorCodeOn", "1"), ("is_utf8", "1")]
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            strength_meter: true,
            submit_label: "Create Account".to_string(),
            loading_label: "Creating Account...".to_string(),
        }
    }

    /// Looks a preset up by name.
    ///
    /// # Errors
    /// Returns [`Error::UnknownForm`] for names other than `login` and `register`.
    pub fn by_name(name: &str, universes: &[&str]) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "login" => Ok(Self::login(universes)),
            "register" => Ok(Self::register(universes)),
            other => Err(Error::UnknownForm(other.to_string())),
        }
    }

    #[must_use]
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.id.as_str() == id)
    }

    /// The field whose value drives the strength indicator, if any.
    #[must_use]
    pub fn password_field(&self) -> Option<&Field> {
        self.fields
            .iter()
            .find(|field| matches!(field.kind, FieldKind::Password))
    }

    /// Confirmations paired with `id`.
    pub fn confirmations_of<'a>(&'a self, id: &'a FieldId) -> impl Iterator<Item = &'a Field> {
        self.fields.iter().filter(move |field| {
            matches!(&field.kind, FieldKind::PasswordConfirmation { pair } if pair == id)
        })
    }
}

fn universe_kind(universes: &[&str]) -> FieldKind {
    FieldKind::SingleSelect {
        options: universes.iter().map(ToString::to_string).collect(),
    }
}
