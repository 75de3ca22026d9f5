//! Renders already-computed state onto a [`Surface`]. No validation happens
//! here; every decision arrives in the [`View`].

use super::{
    field::FieldId, preset::FormSpec, state::FormState, strength::StrengthTier,
    submission::SubmissionPhase, surface::Surface,
};
use std::collections::BTreeSet;

/// Everything the presenter needs for one render pass.
#[derive(Debug)]
pub struct View<'a> {
    pub state: &'a FormState,
    /// Fields whose verdict the user may see.
    pub revealed: &'a BTreeSet<FieldId>,
    /// Focused fields whose invalid indicator is hidden until the next edit.
    pub suppressed: &'a BTreeSet<FieldId>,
    pub strength: StrengthTier,
    pub phase: SubmissionPhase,
    pub general_errors: &'a [String],
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Presenter;

impl Presenter {
    pub fn render<S: Surface + ?Sized>(surface: &mut S, spec: &FormSpec, view: &View<'_>) {
        for field in &spec.fields {
            let message = view
                .state
                .verdict(&field.id)
                .filter(|verdict| !verdict.is_valid() && view.revealed.contains(&field.id))
                .map_or("", |verdict| verdict.message());
            let indicate = !message.is_empty() && !view.suppressed.contains(&field.id);
            surface.set_invalid(&field.id, indicate);
            surface.set_error_text(&field.id, message);
        }

        let submitting = view.phase == SubmissionPhase::Submitting;
        surface.set_submit_enabled(view.state.submittable() && !submitting);
        surface.set_loading(submitting);
        surface.set_submit_label(if submitting {
            &spec.loading_label
        } else {
            &spec.submit_label
        });

        if spec.strength_meter {
            surface.set_strength(view.strength);
        }
        surface.set_general_errors(view.general_errors);
    }
}
