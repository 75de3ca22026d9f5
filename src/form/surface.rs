//! Presentation boundary. Whatever owns the real elements implements
//! [`Surface`]; the engine reads values through it and writes display state
//! back, and never depends on layout or styling.

use super::{
    field::{FieldId, FieldValue},
    strength::StrengthTier,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Element-state contract for one form.
pub trait Surface {
    /// Current value of a field, read on demand.
    fn read(&self, field: &FieldId) -> FieldValue;
    fn set_invalid(&mut self, field: &FieldId, invalid: bool);
    fn set_error_text(&mut self, field: &FieldId, message: &str);
    fn set_submit_enabled(&mut self, enabled: bool);
    fn set_submit_label(&mut self, label: &str);
    fn set_loading(&mut self, loading: bool);
    fn set_strength(&mut self, tier: StrengthTier);
    /// Replaces the content of the general alert region; empty hides it.
    fn set_general_errors(&mut self, messages: &[String]);
    fn focus(&mut self, field: &FieldId);
    fn is_masked(&self, field: &FieldId) -> bool;
    fn set_masked(&mut self, field: &FieldId, masked: bool);
}

/// Page-level affordances that live outside any form.
pub trait Chrome {
    fn is_menu_open(&self) -> bool;
    fn set_menu_open(&mut self, open: bool);
    fn scroll_offset(&self) -> f64;
    fn set_scroll_button_visible(&mut self, visible: bool);
    fn scroll_to_top(&mut self);
}

/// In-memory surface. Holds the values the user "typed" and a snapshot of
/// everything the presenter rendered.
#[derive(Debug, Default, Clone, Serialize)]
pub struct MemorySurface {
    #[serde(skip)]
    values: BTreeMap<FieldId, FieldValue>,
    #[serde(skip)]
    unmasked: BTreeSet<FieldId>,
    pub invalid: BTreeSet<FieldId>,
    pub errors: BTreeMap<FieldId, String>,
    pub submit_enabled: bool,
    pub submit_label: String,
    pub loading: bool,
    pub strength: StrengthTier,
    pub general_errors: Vec<String>,
    pub focused: Option<FieldId>,
    /// Number of times the submit control went from disabled to enabled.
    pub enable_count: usize,
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, field: impl Into<FieldId>, value: impl Into<String>) {
        self.values
            .insert(field.into(), FieldValue::Text(value.into()));
    }

    pub fn set_checked(&mut self, field: impl Into<FieldId>, checked: bool) {
        self.values.insert(field.into(), FieldValue::Checked(checked));
    }

    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(&FieldId::new(field)).map(String::as_str)
    }

    #[must_use]
    pub fn is_invalid(&self, field: &str) -> bool {
        self.invalid.contains(&FieldId::new(field))
    }
}

impl Surface for MemorySurface {
    fn read(&self, field: &FieldId) -> FieldValue {
        self.values.get(field).cloned().unwrap_or_default()
    }

    fn set_invalid(&mut self, field: &FieldId, invalid: bool) {
        if invalid {
            self.invalid.insert(field.clone());
        } else {
            self.invalid.remove(field);
        }
    }

    fn set_error_text(&mut self, field: &FieldId, message: &str) {
        if message.is_empty() {
            self.errors.remove(field);
        } else {
            self.errors.insert(field.clone(), message.to_string());
        }
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        if enabled && !self.submit_enabled {
            self.enable_count += 1;
        }
        self.submit_enabled = enabled;
    }

    fn set_submit_label(&mut self, label: &str) {
        label.clone_into(&mut self.submit_label);
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_strength(&mut self, tier: StrengthTier) {
        self.strength = tier;
    }

    fn set_general_errors(&mut self, messages: &[String]) {
        self.general_errors = messages.to_vec();
    }

    fn focus(&mut self, field: &FieldId) {
        self.focused = Some(field.clone());
    }

    fn is_masked(&self, field: &FieldId) -> bool {
        !self.unmasked.contains(field)
    }

    fn set_masked(&mut self, field: &FieldId, masked: bool) {
        if masked {
            self.unmasked.remove(field);
        } else {
            self.unmasked.insert(field.clone());
        }
    }
}

/// In-memory page chrome.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryChrome {
    pub menu_open: bool,
    pub offset: f64,
    pub scroll_button_visible: bool,
}

impl Chrome for MemoryChrome {
    fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    fn set_menu_open(&mut self, open: bool) {
        self.menu_open = open;
    }

    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn set_scroll_button_visible(&mut self, visible: bool) {
        self.scroll_button_visible = visible;
    }

    fn scroll_to_top(&mut self) {
        self.offset = 0.0;
    }
}
