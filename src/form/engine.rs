//! The delegated handler for one form. Every input, change, focus, blur and
//! submit event goes through [`FormEngine::handle`], which recomputes the
//! [`FormState`] from the surface and renders it in the same turn.

use super::{
    field::{FieldId, FieldKind},
    preset::FormSpec,
    presenter::{Presenter, View},
    server_errors::ServerErrors,
    state::FormState,
    strength::{StrengthTier, score},
    submission::{Decision, SubmissionController, SubmissionPhase, TimerToken},
    surface::Surface,
    toggle::PasswordVisibility,
    validator::Rules,
};
use crate::{config::EngineConfig, transport::Submission};
use std::{
    collections::{BTreeMap, BTreeSet},
    time::Duration,
};
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEvent {
    /// A keystroke changed a text value.
    Input(FieldId),
    /// A select or checkbox changed.
    Change(FieldId),
    Focus(FieldId),
    Blur(FieldId),
    Submit,
    /// The safety timer armed for a submission fired.
    TimerElapsed(TimerToken),
    /// The page transitioned after a submission.
    Navigated,
    /// The show/hide control next to a password input was activated.
    TogglePassword(FieldId),
}

/// Work for the host after an accepted submit: deliver `submission` and arm
/// `timer` to fire after `timeout` unless the page transitions first.
#[derive(Debug)]
pub struct Dispatch {
    pub submission: Submission,
    pub timer: TimerToken,
    pub timeout: Duration,
}

#[derive(Debug)]
pub struct FormEngine<S> {
    spec: FormSpec,
    config: EngineConfig,
    rules: Rules,
    surface: S,
    controller: SubmissionController,
    state: FormState,
    strength: StrengthTier,
    revealed: BTreeSet<FieldId>,
    suppressed: BTreeSet<FieldId>,
    overrides: BTreeMap<FieldId, String>,
    general_errors: Vec<String>,
}

impl<S: Surface> FormEngine<S> {
    /// Engine for a fresh page load. Nothing is marked invalid yet, but the
    /// submit control already reflects whether the form can be sent. The first
    /// text input receives focus.
    pub fn new(spec: FormSpec, config: EngineConfig, surface: S) -> Self {
        Self::load(spec, config, surface, ServerErrors::default())
    }

    /// Engine for a page load that carries server-reported errors. Affected
    /// fields are marked invalid immediately and keep the server message until
    /// the user edits them. Focus goes to the first affected field.
    pub fn load(spec: FormSpec, config: EngineConfig, surface: S, errors: ServerErrors) -> Self {
        let errors = errors.scoped_to(&spec);
        let controller = if errors.is_empty() {
            SubmissionController::new(config.submit_timeout)
        } else {
            info!(
                form = %spec.name,
                fields = errors.fields.len(),
                general = errors.general.len(),
                "form loaded with server errors"
            );
            SubmissionController::after_rejection(config.submit_timeout)
        };
        let overrides = errors.field_overrides();
        let revealed = overrides.keys().cloned().collect();
        let rules = config.rules();
        let state = FormState::recompute(&spec, &surface, &rules).with_overrides(&overrides);

        let mut engine = Self {
            spec,
            config,
            rules,
            surface,
            controller,
            state,
            strength: StrengthTier::None,
            revealed,
            suppressed: BTreeSet::new(),
            overrides,
            general_errors: errors.general,
        };
        engine.refresh();
        if let Some(field) = engine.initial_focus() {
            engine.surface.focus(&field);
        }
        engine
    }

    fn initial_focus(&self) -> Option<FieldId> {
        self.spec
            .fields
            .iter()
            .find(|field| self.overrides.contains_key(&field.id))
            .or_else(|| self.spec.fields.iter().find(|field| field.is_text_input()))
            .map(|field| field.id.clone())
    }

    /// Handles one user or runtime event to completion.
    pub fn handle(&mut self, event: FormEvent) -> Option<Dispatch> {
        debug!(form = %self.spec.name, ?event, "form event");
        match event {
            FormEvent::Input(field) | FormEvent::Change(field) => {
                self.on_edit(field);
                None
            }
            FormEvent::Focus(field) => {
                self.suppressed.insert(field);
                self.refresh();
                None
            }
            FormEvent::Blur(field) => {
                self.suppressed.remove(&field);
                self.revealed.insert(field);
                self.refresh();
                None
            }
            FormEvent::Submit => self.on_submit(),
            FormEvent::TimerElapsed(token) => {
                if self.controller.on_timeout(token) {
                    self.refresh();
                }
                None
            }
            FormEvent::Navigated => {
                if let Some(token) = self.controller.on_navigated() {
                    debug!(?token, "submit timer released");
                }
                None
            }
            FormEvent::TogglePassword(field) => {
                if self.is_password(&field) {
                    PasswordVisibility::toggle(&mut self.surface, &field);
                }
                None
            }
        }
    }

    fn on_edit(&mut self, field: FieldId) {
        if self.overrides.remove(&field).is_some() {
            debug!(%field, "server error cleared by edit");
        }
        self.suppressed.remove(&field);
        let confirmations: Vec<FieldId> = self
            .spec
            .confirmations_of(&field)
            .map(|confirmation| confirmation.id.clone())
            .filter(|id| !self.surface.read(id).text().is_empty())
            .collect();
        self.revealed.extend(confirmations);
        self.revealed.insert(field);
        self.refresh();
    }

    fn on_submit(&mut self) -> Option<Dispatch> {
        if !self.controller.begin() {
            return None;
        }
        self.recompute();
        match self.controller.resolve(&self.state, &self.spec) {
            Decision::Rejected { first_invalid } => {
                self.revealed
                    .extend(self.spec.fields.iter().map(|field| field.id.clone()));
                self.suppressed.clear();
                self.render();
                if let Some(field) = first_invalid {
                    self.surface.focus(&field);
                }
                None
            }
            Decision::Accepted { timer, timeout } => {
                self.general_errors.clear();
                self.render();
                let submission = self.submission();
                info!(form = %self.spec.name, destination = %submission.destination, "submitting form");
                Some(Dispatch {
                    submission,
                    timer,
                    timeout,
                })
            }
        }
    }

    fn submission(&self) -> Submission {
        let values = self.spec.fields.iter().filter_map(|field| {
            self.surface
                .read(&field.id)
                .submitted()
                .map(|value| (field.id.to_string(), value))
        });
        let fields = values.chain(self.spec.hidden.iter().cloned()).collect();
        Submission {
            form: self.spec.name.clone(),
            destination: self.config.destination.clone(),
            method: self.config.method,
            fields,
            csrf_token: self.config.csrf_token.clone(),
        }
    }

    fn recompute(&mut self) {
        self.state = FormState::recompute(&self.spec, &self.surface, &self.rules)
            .with_overrides(&self.overrides);
        self.strength = self
            .spec
            .password_field()
            .filter(|_| self.spec.strength_meter)
            .map_or(StrengthTier::None, |field| {
                score(self.surface.read(&field.id).text())
            });
    }

    fn render(&mut self) {
        Presenter::render(
            &mut self.surface,
            &self.spec,
            &View {
                state: &self.state,
                revealed: &self.revealed,
                suppressed: &self.suppressed,
                strength: self.strength,
                phase: self.controller.phase(),
                general_errors: &self.general_errors,
            },
        );
    }

    fn refresh(&mut self) {
        self.recompute();
        self.render();
    }

    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    #[must_use]
    pub const fn strength(&self) -> StrengthTier {
        self.strength
    }

    #[must_use]
    pub const fn phase(&self) -> SubmissionPhase {
        self.controller.phase()
    }

    #[must_use]
    pub const fn spec(&self) -> &FormSpec {
        &self.spec
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn general_errors(&self) -> &[String] {
        &self.general_errors
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for the host to apply value changes before raising the
    /// matching event.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Whether `field` is a password input that can be unmasked.
    #[must_use]
    pub fn is_password(&self, field: &FieldId) -> bool {
        self.spec.field(field.as_str()).is_some_and(|field| {
            matches!(
                field.kind,
                FieldKind::Password | FieldKind::PasswordConfirmation { .. }
            )
        })
    }
}
