//! Submit state machine: `Idle -> Validating -> { Submitting | Idle }`.
//!
//! An accepted submit arms a one-shot safety timer. The timer is identified by
//! a [`TimerToken`]; only the currently armed token can move the machine back
//! to `Idle`, so a stale or cancelled timer never re-enables the control twice.

use super::{field::FieldId, preset::FormSpec, state::FormState};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    /// Initial phase of a page load that carries server-reported errors.
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Validation failed; the default action is cancelled.
    Rejected { first_invalid: Option<FieldId> },
    /// Hand the form to the collaborator and arm `timer` for `timeout`.
    Accepted { timer: TimerToken, timeout: Duration },
}

#[derive(Debug)]
pub struct SubmissionController {
    phase: SubmissionPhase,
    timeout: Duration,
    armed: Option<TimerToken>,
    issued: u64,
}

impl SubmissionController {
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            phase: SubmissionPhase::Idle,
            timeout,
            armed: None,
            issued: 0,
        }
    }

    /// Machine for a page load that follows a rejected submission.
    #[must_use]
    pub const fn after_rejection(timeout: Duration) -> Self {
        Self {
            phase: SubmissionPhase::Failed,
            timeout,
            armed: None,
            issued: 0,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    #[must_use]
    pub const fn armed(&self) -> Option<TimerToken> {
        self.armed
    }

    /// Starts a submit attempt. Returns `false` while a submission is already
    /// in flight, in which case the attempt is ignored.
    pub fn begin(&mut self) -> bool {
        if self.phase == SubmissionPhase::Submitting {
            debug!("submit ignored: submission already in flight");
            return false;
        }
        self.phase = SubmissionPhase::Validating;
        true
    }

    /// Resolves a started attempt against a freshly recomputed state.
    pub fn resolve(&mut self, state: &FormState, spec: &FormSpec) -> Decision {
        debug_assert_eq!(self.phase, SubmissionPhase::Validating);
        if !state.submittable() {
            self.phase = SubmissionPhase::Idle;
            let first_invalid = state.first_invalid(spec).cloned();
            debug!(form = %spec.name, ?first_invalid, "submit rejected by validation");
            return Decision::Rejected { first_invalid };
        }
        self.issued += 1;
        let timer = TimerToken(self.issued);
        self.armed = Some(timer);
        self.phase = SubmissionPhase::Submitting;
        debug!(form = %spec.name, "submit accepted");
        Decision::Accepted {
            timer,
            timeout: self.timeout,
        }
    }

    /// Safety fallback. Returns `true` only when `token` is the armed timer of
    /// the submission in flight, which then reverts to `Idle`.
    pub fn on_timeout(&mut self, token: TimerToken) -> bool {
        if self.phase != SubmissionPhase::Submitting || self.armed != Some(token) {
            debug!(?token, "stale submit timer ignored");
            return false;
        }
        self.armed = None;
        self.phase = SubmissionPhase::Idle;
        warn!(
            timeout_secs = self.timeout.as_secs_f64(),
            "no page transition after submit; re-enabling the form"
        );
        true
    }

    /// The page transitioned; the pending timer is released.
    pub fn on_navigated(&mut self) -> Option<TimerToken> {
        self.armed.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{surface::MemorySurface, validator::Rules};

    const TIMEOUT: Duration = Duration::from_secs(10);

    fn states() -> (FormSpec, FormState, FormState) {
        let spec = FormSpec::login(&[]);
        let mut surface = MemorySurface::new();
        let invalid = FormState::recompute(&spec, &surface, &Rules::default());
        surface.set_text("email", "a@b.com");
        surface.set_text("password", "longpass1");
        surface.set_text("uni", "s1");
        let valid = FormState::recompute(&spec, &surface, &Rules::default());
        (spec, invalid, valid)
    }

    #[test]
    fn rejected_attempt_returns_to_idle() {
        let (spec, invalid, _) = states();
        let mut controller = SubmissionController::new(TIMEOUT);
        assert!(controller.begin());
        assert_eq!(controller.phase(), SubmissionPhase::Validating);
        let decision = controller.resolve(&invalid, &spec);
        assert_eq!(
            decision,
            Decision::Rejected {
                first_invalid: Some(FieldId::new("email"))
            }
        );
        assert_eq!(controller.phase(), SubmissionPhase::Idle);
        assert_eq!(controller.armed(), None);
    }

    #[test]
    fn accepted_attempt_arms_timer() {
        let (spec, _, valid) = states();
        let mut controller = SubmissionController::new(TIMEOUT);
        controller.begin();
        let Decision::Accepted { timer, timeout } = controller.resolve(&valid, &spec) else {
            panic!("expected an accepted submission");
        };
        assert_eq!(timeout, TIMEOUT);
        assert_eq!(controller.armed(), Some(timer));
        assert_eq!(controller.phase(), SubmissionPhase::Submitting);
        assert!(!controller.begin(), "double submit must be ignored");
        assert_eq!(controller.phase(), SubmissionPhase::Submitting);
    }

    #[test]
    fn timeout_fires_once() {
        let (spec, _, valid) = states();
        let mut controller = SubmissionController::new(TIMEOUT);
        controller.begin();
        let Decision::Accepted { timer, .. } = controller.resolve(&valid, &spec) else {
            panic!("expected an accepted submission");
        };
        assert!(controller.on_timeout(timer));
        assert_eq!(controller.phase(), SubmissionPhase::Idle);
        assert!(!controller.on_timeout(timer));
    }

    #[test]
    fn stale_timer_cannot_reset_new_submission() {
        let (spec, _, valid) = states();
        let mut controller = SubmissionController::new(TIMEOUT);
        controller.begin();
        let Decision::Accepted { timer: first, .. } = controller.resolve(&valid, &spec) else {
            panic!("expected an accepted submission");
        };
        assert!(controller.on_timeout(first));
        controller.begin();
        let Decision::Accepted { timer: second, .. } = controller.resolve(&valid, &spec) else {
            panic!("expected an accepted submission");
        };
        assert_ne!(first, second);
        assert!(!controller.on_timeout(first));
        assert_eq!(controller.phase(), SubmissionPhase::Submitting);
    }

    #[test]
    fn navigation_cancels_timer() {
        let (spec, _, valid) = states();
        let mut controller = SubmissionController::new(TIMEOUT);
        controller.begin();
        let Decision::Accepted { timer, .. } = controller.resolve(&valid, &spec) else {
            panic!("expected an accepted submission");
        };
        assert_eq!(controller.on_navigated(), Some(timer));
        assert!(!controller.on_timeout(timer));
        assert_eq!(controller.phase(), SubmissionPhase::Submitting);
    }

    #[test]
    fn failed_load_can_submit_again() {
        let (spec, _, valid) = states();
        let mut controller = SubmissionController::after_rejection(TIMEOUT);
        assert_eq!(controller.phase(), SubmissionPhase::Failed);
        assert!(controller.begin());
        assert!(matches!(
            controller.resolve(&valid, &spec),
            Decision::Accepted { .. }
        ));
    }
}
