use crate::config::SubmitMethod;
use anyhow::{Context, Result};
use clap::{Arg, Command};
use secrecy::SecretString;

pub const ARG_ACTION_URL: &str = "action-url";
pub const ARG_METHOD: &str = "method";
pub const ARG_CSRF_TOKEN: &str = "csrf-token";
pub const ARG_SUBMIT_TIMEOUT_SECONDS: &str = "submit-timeout-seconds";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_ACTION_URL)
                .long("action-url")
                .help("Destination endpoint of the form")
                .long_help(
                    "Destination endpoint of the form. May instead be provided as action_url in the --config file.",
                )
                .env("FORMGATE_ACTION_URL"),
        )
        .arg(
            Arg::new(ARG_METHOD)
                .long("method")
                .help("HTTP method used to submit the form")
                .env("FORMGATE_METHOD")
                .default_value("post")
                .value_parser(["post", "get"])
                .ignore_case(true),
        )
        .arg(
            Arg::new(ARG_CSRF_TOKEN)
                .long("csrf-token")
                .help("Anti-forgery token sent as _token")
                .env("FORMGATE_CSRF_TOKEN")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_SUBMIT_TIMEOUT_SECONDS)
                .long("submit-timeout-seconds")
                .help("Seconds before a stalled submission re-enables the form")
                .env("FORMGATE_SUBMIT_TIMEOUT_SECONDS")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}

#[derive(Debug)]
pub struct Options {
    pub action_url: Option<String>,
    pub method: SubmitMethod,
    pub csrf_token: Option<SecretString>,
    pub submit_timeout_seconds: u64,
}

impl Options {
    /// # Errors
    /// Returns an error if the method cannot be parsed.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        let method = matches
            .get_one::<String>(ARG_METHOD)
            .map_or(Ok(SubmitMethod::default()), |method| method.parse())
            .context("invalid --method")?;

        Ok(Self {
            action_url: matches.get_one::<String>(ARG_ACTION_URL).cloned(),
            method,
            csrf_token: matches
                .get_one::<String>(ARG_CSRF_TOKEN)
                .map(|token| SecretString::from(token.clone())),
            submit_timeout_seconds: matches
                .get_one::<u64>(ARG_SUBMIT_TIMEOUT_SECONDS)
                .copied()
                .unwrap_or(crate::config::DEFAULT_SUBMIT_TIMEOUT.as_secs()),
        })
    }
}
