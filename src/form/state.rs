//! Form state aggregation. A [`FormState`] is derived from the current field
//! values every time it is needed; it is never patched in place after a value
//! changes.

use super::{
    field::{FieldId, FieldKind},
    preset::FormSpec,
    surface::Surface,
    validator::{Rules, Verdict, validate},
};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormState {
    verdicts: BTreeMap<FieldId, Verdict>,
    submittable: bool,
}

impl FormState {
    /// Validates every required field of `spec` against the values currently
    /// held by `surface`.
    pub fn recompute<S: Surface + ?Sized>(spec: &FormSpec, surface: &S, rules: &Rules) -> Self {
        let verdicts = spec
            .fields
            .iter()
            .filter(|field| field.required)
            .map(|field| {
                let value = surface.read(&field.id);
                let related = match &field.kind {
                    FieldKind::PasswordConfirmation { pair } => Some(surface.read(pair)),
                    _ => None,
                };
                (
                    field.id.clone(),
                    validate(field, &value, related.as_ref(), rules),
                )
            })
            .collect();
        Self::from_verdicts(verdicts)
    }

    /// Server-reported messages replace the local verdict of their field.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &BTreeMap<FieldId, String>) -> Self {
        for (field, message) in overrides {
            if let Some(verdict) = self.verdicts.get_mut(field) {
                *verdict = Verdict::invalid(message.clone());
            }
        }
        Self::from_verdicts(self.verdicts)
    }

    fn from_verdicts(verdicts: BTreeMap<FieldId, Verdict>) -> Self {
        let submittable = verdicts.values().all(Verdict::is_valid);
        Self {
            verdicts,
            submittable,
        }
    }

    #[must_use]
    pub const fn submittable(&self) -> bool {
        self.submittable
    }

    #[must_use]
    pub fn verdict(&self, field: &FieldId) -> Option<&Verdict> {
        self.verdicts.get(field)
    }

    pub fn verdicts(&self) -> impl Iterator<Item = (&FieldId, &Verdict)> {
        self.verdicts.iter()
    }

    /// First invalid field in form order.
    #[must_use]
    pub fn first_invalid<'a>(&self, spec: &'a FormSpec) -> Option<&'a FieldId> {
        spec.fields
            .iter()
            .map(|field| &field.id)
            .find(|id| self.verdicts.get(*id).is_some_and(|v| !v.is_valid()))
    }
}
