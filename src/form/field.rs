//! Field definitions. A field only describes what it is; its value lives in the
//! surface that owns the element and is read on demand.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a field, matching the element id and the submitted name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Email,
    Password,
    /// Must equal the current value of the paired password field.
    PasswordConfirmation {
        pair: FieldId,
    },
    /// An empty `options` list accepts any non-empty selection.
    SingleSelect {
        options: Vec<String>,
    },
    Checkbox,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub id: FieldId,
    pub required: bool,
    pub kind: FieldKind,
}

impl Field {
    #[must_use]
    pub fn required(id: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: FieldId::new(id),
            required: true,
            kind,
        }
    }

    #[must_use]
    pub fn optional(id: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: FieldId::new(id),
            required: false,
            kind,
        }
    }

    #[must_use]
    pub const fn is_checkbox(&self) -> bool {
        matches!(self.kind, FieldKind::Checkbox)
    }

    /// Whether the element is a typed input rather than a select or checkbox.
    #[must_use]
    pub const fn is_text_input(&self) -> bool {
        matches!(
            self.kind,
            FieldKind::Email | FieldKind::Password | FieldKind::PasswordConfirmation { .. }
        )
    }
}

/// Current value of an element as read from the surface.
#[derive(Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl FieldValue {
    /// Text content, or `""` for a checkbox.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Text(value) => value,
            Self::Checked(_) => "",
        }
    }

    /// Checked state, or `false` for a text value.
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        matches!(self, Self::Checked(true))
    }

    /// Value as submitted to the destination, `None` for an unchecked box.
    #[must_use]
    pub fn submitted(&self) -> Option<String> {
        match self {
            Self::Text(value) => Some(value.clone()),
            Self::Checked(true) => Some("on".to_string()),
            Self::Checked(false) => None,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

// Values may hold passwords.
impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => write!(f, "Text(<{} chars>)", value.chars().count()),
            Self::Checked(checked) => write!(f, "Checked({checked})"),
        }
    }
}
