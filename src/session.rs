//! Single-threaded driver that connects a [`FormEngine`] to a [`Submitter`]
//! and the submit safety timer.
//!
//! Events are consumed strictly one at a time. Delivery of an accepted
//! submission and its timer run concurrently with further events, so edits and
//! repeated submit attempts stay responsive while a request is in flight.

use crate::{
    Result,
    form::{FormEngine, FormEvent, Surface, TimerToken},
    transport::{SubmitOutcome, Submitter},
};
use std::{future::Future, pin::Pin};
use tokio::{
    sync::mpsc,
    time::{Instant, sleep_until},
};
use tracing::{debug, info, warn};

type InFlight<'a> = Pin<Box<dyn Future<Output = Result<SubmitOutcome>> + 'a>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// The destination accepted the form and the page moved on.
    Navigated { location: Option<String> },
    /// The event source closed with nothing left in flight.
    Closed,
}

#[derive(Debug)]
pub struct Finished<S> {
    pub end: SessionEnd,
    pub engine: FormEngine<S>,
}

#[derive(Debug)]
pub struct FormSession<S, T> {
    engine: FormEngine<S>,
    submitter: T,
}

impl<S: Surface, T: Submitter> FormSession<S, T> {
    pub const fn new(engine: FormEngine<S>, submitter: T) -> Self {
        Self { engine, submitter }
    }

    /// Runs until the page navigates or `events` closes.
    ///
    /// Once `events` closes, a submission still in flight is awaited until its
    /// safety timer fires, which ends the session with the form re-enabled.
    ///
    /// # Errors
    /// Delivery failures are logged and left to the safety timer, so this only
    /// fails if the driver itself cannot continue.
    pub async fn run(self, mut events: mpsc::Receiver<FormEvent>) -> Result<Finished<S>> {
        let Self {
            mut engine,
            submitter,
        } = self;
        let mut in_flight: Option<InFlight<'_>> = None;
        let mut timer: Option<(Instant, TimerToken)> = None;
        let mut open = true;

        loop {
            tokio::select! {
                event = events.recv(), if open => {
                    let Some(event) = event else {
                        debug!("event source closed");
                        open = false;
                        if in_flight.is_none() || timer.is_none() {
                            return Ok(Finished { end: SessionEnd::Closed, engine });
                        }
                        continue;
                    };
                    if let Some(dispatch) = engine.handle(event) {
                        timer = Some((Instant::now() + dispatch.timeout, dispatch.timer));
                        in_flight = Some(Box::pin(submitter.submit(dispatch.submission)));
                    }
                }
                outcome = in_flight_or_pending(in_flight.as_mut()) => {
                    in_flight = None;
                    match outcome {
                        Ok(SubmitOutcome::Navigated { location }) => {
                            engine.handle(FormEvent::Navigated);
                            info!(location = location.as_deref().unwrap_or("-"), "page navigated");
                            return Ok(Finished { end: SessionEnd::Navigated { location }, engine });
                        }
                        Ok(SubmitOutcome::Rejected(errors)) => {
                            info!(
                                fields = errors.fields.len(),
                                general = errors.general.len(),
                                "submission rejected; reloading form with server errors"
                            );
                            timer = None;
                            let spec = engine.spec().clone();
                            let config = engine.config().clone();
                            engine = FormEngine::load(spec, config, engine.into_surface(), errors);
                        }
                        Err(err) => {
                            warn!(error = %err, "submission failed; waiting for the safety timer");
                        }
                    }
                    if !open && timer.is_none() {
                        return Ok(Finished { end: SessionEnd::Closed, engine });
                    }
                }
                () = sleep_or_pending(timer.map(|(deadline, _)| deadline)) => {
                    if let Some((_, token)) = timer.take() {
                        engine.handle(FormEvent::TimerElapsed(token));
                    }
                    if !open {
                        return Ok(Finished { end: SessionEnd::Closed, engine });
                    }
                }
            }
        }
    }
}

async fn in_flight_or_pending(in_flight: Option<&mut InFlight<'_>>) -> Result<SubmitOutcome> {
    match in_flight {
        Some(future) => future.await,
        None => std::future::pending().await,
    }
}

async fn sleep_or_pending(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
