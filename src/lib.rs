//! # Formgate (Login & Registration Form Gating)
//!
//! `formgate` validates authentication forms while the user types, derives an
//! advisory password strength, and refuses to hand a form to its destination
//! endpoint until every required field is known-valid.
//!
//! ## Flow
//!
//! Every user event for a form enters through a single delegated handler,
//! [`form::FormEngine::handle`]. The engine reads the current values from the
//! [`form::Surface`] that owns the real elements, recomputes the
//! [`form::FormState`], and renders the result back through the
//! [`form::Presenter`]. Nothing is cached across a value change.
//!
//! A submit attempt re-validates synchronously. A rejected attempt focuses the
//! first invalid field and never reaches the network. An accepted attempt moves
//! into the loading state and yields a [`transport::Submission`] for the
//! external collaborator, together with a one-shot safety timer that re-enables
//! the submit control if the page never transitions.
//!
//! ## Server errors
//!
//! A rejected submission comes back as a fresh page load. The engine is rebuilt
//! with the [`form::ServerErrors`] from that response, which pre-mark the
//! affected fields and stay authoritative until the user edits them.
//!
//! Client-side rules are a UX convenience: the destination endpoint remains the
//! authority on what it accepts.

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod session;
pub mod transport;

pub use self::config::EngineConfig;
pub use self::error::{Error, Result};

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
