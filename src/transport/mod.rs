//! The external submission collaborator. The engine only ever hands over a
//! fully validated [`Submission`]; what the destination does with it is opaque.

mod http;

pub use self::http::HttpSubmitter;

use crate::{config::SubmitMethod, form::ServerErrors};
use secrecy::{ExposeSecret, SecretString};
use std::{fmt, future::Future};
use url::Url;

/// Form field carrying the hosting page's anti-forgery token.
pub const CSRF_FIELD: &str = "_token";

/// A validated form ready to leave the page.
pub struct Submission {
    pub form: String,
    pub destination: Url,
    pub method: SubmitMethod,
    /// Field values followed by hidden pass-through inputs, in form order.
    pub fields: Vec<(String, String)>,
    pub csrf_token: Option<SecretString>,
}

impl Submission {
    /// Name/value pairs as sent on the wire, anti-forgery token first.
    #[must_use]
    pub fn pairs(&self) -> Vec<(String, String)> {
        let token = self
            .csrf_token
            .as_ref()
            .map(|token| (CSRF_FIELD.to_string(), token.expose_secret().to_string()));
        token.into_iter().chain(self.fields.iter().cloned()).collect()
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

// Values include passwords; only names are printed.
impl fmt::Debug for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.fields.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("Submission")
            .field("form", &self.form)
            .field("destination", &self.destination.as_str())
            .field("method", &self.method)
            .field("fields", &names)
            .field("csrf_token_set", &self.csrf_token.is_some())
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The page moved on; `location` is the redirect target when one was given.
    Navigated { location: Option<String> },
    /// The destination refused the form and will re-render it with errors.
    Rejected(ServerErrors),
}

pub trait Submitter {
    /// Delivers `submission` to its destination.
    fn submit(
        &self,
        submission: Submission,
    ) -> impl Future<Output = crate::Result<SubmitOutcome>>;
}
