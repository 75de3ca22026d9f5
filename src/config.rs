//! Engine configuration passed explicitly at construction. Values come from CLI
//! flags (with environment fallbacks) and can be overlaid by a JSON file so a
//! deployment can change the destination without rebuilding. The anti-forgery
//! token is kept in a `SecretString` and never logged.

use crate::{
    error::{Error, Result},
    form::Rules,
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path, str::FromStr, time::Duration};
use url::Url;

/// Safety fallback before a stalled submission re-enables the submit control.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Minimum password length enforced by the client for early UX feedback.
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

/// HTTP method used when handing the form to its destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitMethod {
    #[default]
    Post,
    Get,
}

impl SubmitMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Get => "get",
        }
    }
}

impl fmt::Display for SubmitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmitMethod {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "post" => Ok(Self::Post),
            "get" => Ok(Self::Get),
            other => Err(Error::Method(other.to_string())),
        }
    }
}

/// Configuration for one form engine.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub destination: Url,
    pub method: SubmitMethod,
    pub csrf_token: Option<SecretString>,
    pub submit_timeout: Duration,
    pub min_password_length: usize,
}

impl EngineConfig {
    #[must_use]
    pub fn new(destination: Url) -> Self {
        Self {
            destination,
            method: SubmitMethod::default(),
            csrf_token: None,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }

    /// Validation rules derived from this configuration.
    #[must_use]
    pub const fn rules(&self) -> Rules {
        Rules {
            min_password_length: self.min_password_length,
        }
    }

    /// Overlays values from a JSON file. Blank values in the file are ignored.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if the
    /// resulting configuration is invalid.
    pub fn apply_file(&mut self, path: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        let runtime = parse_runtime_config(&raw)?;
        apply_runtime_overrides(self, runtime)?;
        self.check()
    }

    /// Rejects values the engine cannot work with.
    ///
    /// # Errors
    /// Returns an error if the timeout or the password length is zero.
    pub fn check(&self) -> Result<()> {
        if self.submit_timeout.is_zero() {
            return Err(Error::Config("submit timeout must be positive".to_string()));
        }
        if self.min_password_length == 0 {
            return Err(Error::Config(
                "minimum password length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RuntimeConfig {
    action_url: Option<String>,
    method: Option<String>,
    csrf_token: Option<String>,
    submit_timeout_seconds: Option<u64>,
    min_password_length: Option<usize>,
}

fn parse_runtime_config(raw: &str) -> Result<RuntimeConfig> {
    Ok(serde_json::from_str(raw)?)
}

fn apply_runtime_overrides(config: &mut EngineConfig, runtime: RuntimeConfig) -> Result<()> {
    if let Some(value) = runtime.action_url.as_deref().and_then(normalize_runtime_value) {
        config.destination = Url::parse(&value)?;
    }
    if let Some(value) = runtime.method.as_deref().and_then(normalize_runtime_value) {
        config.method = value.parse()?;
    }
    if let Some(value) = runtime.csrf_token.as_deref().and_then(normalize_runtime_value) {
        config.csrf_token = Some(SecretString::from(value));
    }
    if let Some(seconds) = runtime.submit_timeout_seconds {
        config.submit_timeout = Duration::from_secs(seconds);
    }
    if let Some(length) = runtime.min_password_length {
        config.min_password_length = length;
    }
    Ok(())
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
