//! Errors reported by the destination after a rejected submission. They arrive
//! with the next page load and seed a fresh engine.

use super::{field::FieldId, preset::FormSpec, validator::MSG_INVALID_VALUE};
use crate::error::Result;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServerErrors {
    pub fields: BTreeMap<FieldId, Vec<String>>,
    pub general: Vec<String>,
}

/// Validation error body in the `{"message": .., "errors": {field: [..]}}` shape.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorBody {
    message: Option<String>,
    errors: BTreeMap<String, Vec<String>>,
}

impl ServerErrors {
    /// Reads an error body. Every key of `errors` is kept as field-scoped
    /// until [`ServerErrors::scoped_to`] matches it against a form.
    ///
    /// # Errors
    /// Returns an error if `body` is not valid JSON of the expected shape.
    pub fn parse(body: &str) -> Result<Self> {
        let body: ErrorBody = serde_json::from_str(body)?;
        let mut errors = Self::default();
        for (key, messages) in body.errors {
            let messages = readable(messages);
            if !messages.is_empty() {
                errors.fields.insert(FieldId::new(key), messages);
            }
        }
        if errors.is_empty()
            && let Some(message) = body.message.filter(|m| !m.trim().is_empty())
        {
            errors.general.push(message.trim().to_string());
        }
        Ok(errors)
    }

    /// Moves messages for keys that are not validated fields of `spec` into
    /// the general list, so nothing reported is dropped. Messages are trimmed
    /// and blank ones removed; a flagged field left without any message gets
    /// [`MSG_INVALID_VALUE`].
    #[must_use]
    pub fn scoped_to(mut self, spec: &FormSpec) -> Self {
        let (known, unknown): (BTreeMap<_, _>, BTreeMap<_, _>) = std::mem::take(&mut self.fields)
            .into_iter()
            .partition(|(field, _)| {
                spec.field(field.as_str())
                    .is_some_and(|field| field.required)
            });
        self.fields = known
            .into_iter()
            .map(|(field, messages)| {
                let mut messages = readable(messages);
                if messages.is_empty() {
                    messages.push(MSG_INVALID_VALUE.to_string());
                }
                (field, messages)
            })
            .collect();
        let mut general = readable(std::mem::take(&mut self.general));
        general.extend(readable(unknown.into_values().flatten()));
        self.general = general;
        self
    }

    /// A single general message, used when the response carries no usable body.
    #[must_use]
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            fields: BTreeMap::new(),
            general: vec![message.into()],
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_empty()
    }

    /// First message per field, as shown inline.
    #[must_use]
    pub fn field_overrides(&self) -> BTreeMap<FieldId, String> {
        self.fields
            .iter()
            .filter_map(|(field, messages)| {
                messages.first().map(|message| (field.clone(), message.clone()))
            })
            .collect()
    }
}

fn readable(messages: impl IntoIterator<Item = String>) -> Vec<String> {
    messages
        .into_iter()
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> FormSpec {
        FormSpec::register(&["s1"])
    }

    #[test]
    fn parse_splits_field_and_general_errors() -> Result<()> {
        let body = r#"{
            "message": "The given data was invalid.",
            "errors": {
                "email": ["The email has already been taken.", "second"],
                "captcha": ["Too many attempts."],
                "uni": ["  "]
            }
        }"#;
        let errors = ServerErrors::parse(body)?.scoped_to(&spec());
        assert_eq!(errors.fields.len(), 1);
        assert_eq!(
            errors.field_overrides().get(&FieldId::new("email")).map(String::as_str),
            Some("The email has already been taken.")
        );
        assert_eq!(errors.general, vec!["Too many attempts.".to_string()]);
        Ok(())
    }

    #[test]
    fn parse_keeps_every_key_until_scoped() -> Result<()> {
        let errors = ServerErrors::parse(r#"{"errors": {"captcha": ["Too many attempts."]}}"#)?;
        assert!(errors.general.is_empty());
        assert!(errors.fields.contains_key(&FieldId::new("captcha")));
        Ok(())
    }

    #[test]
    fn parse_falls_back_to_message() -> Result<()> {
        let errors = ServerErrors::parse(
            r#"{"message": "These credentials do not match our records."}"#,
        )?;
        assert!(errors.fields.is_empty());
        assert_eq!(
            errors.general,
            vec!["These credentials do not match our records.".to_string()]
        );
        Ok(())
    }

    #[test]
    fn scoping_replaces_blank_field_messages() {
        let errors = ServerErrors {
            fields: BTreeMap::from([
                (FieldId::new("email"), vec![String::new()]),
                (FieldId::new("password"), vec!["   ".to_string(), " Too short. ".to_string()]),
                (FieldId::new("password_confirmation"), vec!["\t".to_string()]),
                (FieldId::new("captcha"), vec![" ".to_string()]),
            ]),
            general: vec!["  ".to_string(), " Try again. ".to_string()],
        }
        .scoped_to(&spec());
        let overrides = errors.field_overrides();
        assert_eq!(
            overrides.get(&FieldId::new("email")).map(String::as_str),
            Some(MSG_INVALID_VALUE)
        );
        assert_eq!(
            overrides.get(&FieldId::new("password")).map(String::as_str),
            Some("Too short.")
        );
        assert_eq!(
            overrides.get(&FieldId::new("password_confirmation")).map(String::as_str),
            Some(MSG_INVALID_VALUE)
        );
        assert_eq!(errors.general, vec!["Try again.".to_string()]);
    }

    #[test]
    fn parse_rejects_non_json() {
        assert!(ServerErrors::parse("<html>").is_err());
    }

    #[test]
    fn empty_body_is_empty() -> Result<()> {
        assert!(ServerErrors::parse("{}")?.is_empty());
        assert!(!ServerErrors::general("boom").is_empty());
        Ok(())
    }
}
