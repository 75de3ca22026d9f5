//! Maps validated CLI matches to an action with its full engine configuration.
//!
//! Configuration is layered: flags, then their environment fallbacks, then the
//! optional `--config` JSON file, whose non-blank values win.

use crate::cli::{
    actions::{Action, FormInput, check, submit},
    commands::{ARG_CONFIG, CMD_CHECK, CMD_SUBMIT, form, submit as submit_args},
};
use crate::config::EngineConfig;
use anyhow::{Context, Result, bail};
use std::{path::Path, time::Duration};
use url::Url;

/// Placeholder destination for forms that are only checked, never sent.
const UNSET_DESTINATION: &str = "about:blank";

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((CMD_CHECK, sub)) => {
            let options = form::Options::parse(sub)?;
            let mut config = EngineConfig::new(Url::parse(UNSET_DESTINATION)?);
            config.min_password_length = options.min_password_length;
            let config = finish_config(config, config_path(sub))?;

            Ok(Action::Check(check::Args {
                json: options.json,
                input: form_input(options),
                config,
            }))
        }
        Some((CMD_SUBMIT, sub)) => {
            let options = form::Options::parse(sub)?;
            let submit_opts = submit_args::Options::parse(sub)?;

            let destination = submit_opts
                .action_url
                .as_deref()
                .unwrap_or(UNSET_DESTINATION);
            let mut config = EngineConfig::new(
                Url::parse(destination).context("invalid --action-url")?,
            );
            config.method = submit_opts.method;
            config.csrf_token = submit_opts.csrf_token;
            config.submit_timeout = Duration::from_secs(submit_opts.submit_timeout_seconds);
            config.min_password_length = options.min_password_length;
            let config = finish_config(config, config_path(sub))?;

            if !matches!(config.destination.scheme(), "http" | "https") {
                bail!(
                    "missing required argument: --action-url (or action_url in --{ARG_CONFIG}) must be an http(s) URL"
                );
            }

            Ok(Action::Submit(submit::Args {
                json: options.json,
                input: form_input(options),
                config,
            }))
        }
        _ => bail!("missing subcommand: expected {CMD_CHECK} or {CMD_SUBMIT}"),
    }
}

fn config_path(matches: &clap::ArgMatches) -> Option<&Path> {
    matches
        .get_one::<String>(ARG_CONFIG)
        .map(|path| Path::new(path.as_str()))
}

fn finish_config(mut config: EngineConfig, path: Option<&Path>) -> Result<EngineConfig> {
    if let Some(path) = path {
        config
            .apply_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
    }
    config.check()?;
    Ok(config)
}

fn form_input(options: form::Options) -> FormInput {
    FormInput {
        form: options.form,
        universes: options.universes,
        fields: options.fields,
    }
}
