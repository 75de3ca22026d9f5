use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command, builder::ValueParser};

pub const ARG_FORM: &str = "form";
pub const ARG_FIELD: &str = "field";
pub const ARG_UNIVERSE: &str = "universe";
pub const ARG_MIN_PASSWORD_LENGTH: &str = "min-password-length";
pub const ARG_JSON: &str = "json";

/// Parses `name=value`. The value may be empty or contain further `=`.
#[must_use]
pub fn validator_field() -> ValueParser {
    ValueParser::from(
        move |pair: &str| -> std::result::Result<(String, String), String> {
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("expected name=value, got '{pair}'"))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(format!("missing field name in '{pair}'"));
            }
            Ok((name.to_string(), value.to_string()))
        },
    )
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_FORM)
                .long("form")
                .help("Form to drive")
                .value_parser(["login", "register"])
                .required(true),
        )
        .arg(
            Arg::new(ARG_FIELD)
                .long("field")
                .help("Field value as name=value, repeatable. Checkboxes take on/off")
                .action(ArgAction::Append)
                .value_parser(validator_field()),
        )
        .arg(
            Arg::new(ARG_UNIVERSE)
                .long("universe")
                .help("Options offered by the universe select (comma separated)")
                .env("FORMGATE_UNIVERSES")
                .value_delimiter(',')
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new(ARG_MIN_PASSWORD_LENGTH)
                .long("min-password-length")
                .help("Minimum password length enforced before submitting")
                .env("FORMGATE_MIN_PASSWORD_LENGTH")
                .default_value("8")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new(ARG_JSON)
                .long("json")
                .help("Print the report as JSON")
                .action(ArgAction::SetTrue),
        )
}

#[derive(Debug)]
pub struct Options {
    pub form: String,
    pub fields: Vec<(String, String)>,
    pub universes: Vec<String>,
    pub min_password_length: usize,
    pub json: bool,
}

impl Options {
    /// # Errors
    /// Returns an error if the form name is missing.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        let form = matches
            .get_one::<String>(ARG_FORM)
            .cloned()
            .context("missing required argument: --form")?;
        let fields = matches
            .get_many::<(String, String)>(ARG_FIELD)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        let universes = matches
            .get_many::<String>(ARG_UNIVERSE)
            .map(|values| {
                values
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let min_password_length = matches
            .get_one::<usize>(ARG_MIN_PASSWORD_LENGTH)
            .copied()
            .unwrap_or(crate::config::DEFAULT_MIN_PASSWORD_LENGTH);

        Ok(Self {
            form,
            fields,
            universes,
            min_password_length,
            json: matches.get_flag(ARG_JSON),
        })
    }
}
