pub mod form;
pub mod logging;
pub mod submit;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const ARG_CONFIG: &str = "config";
pub const CMD_CHECK: &str = "check";
pub const CMD_SUBMIT: &str = "submit";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("formgate")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_CONFIG)
                .long("config")
                .help("JSON file overlaying the engine configuration")
                .env("FORMGATE_CONFIG")
                .global(true),
        )
        .subcommand(form::with_args(
            Command::new(CMD_CHECK)
                .about("Validate field values as a submit attempt would, without sending"),
        ))
        .subcommand(submit::with_args(form::with_args(
            Command::new(CMD_SUBMIT)
                .about("Validate field values and, when submittable, send the form"),
        )));

    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "formgate");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some(env!("CARGO_PKG_DESCRIPTION").to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_check_fields() {
        temp_env::with_vars(
            [
                ("FORMGATE_MIN_PASSWORD_LENGTH", None::<&str>),
                ("FORMGATE_UNIVERSES", None),
            ],
            || {
                let matches = new().get_matches_from(vec![
                    "formgate",
                    "check",
                    "--form",
                    "register",
                    "--field",
                    "email=a@b.com",
                    "--field",
                    "password=a=b=c",
                    "--universe",
                    "s1,s128",
                ]);
                let Some((CMD_CHECK, sub)) = matches.subcommand() else {
                    panic!("expected check subcommand");
                };
                let options = form::Options::parse(sub).unwrap_or_else(|e| panic!("{e}"));
                assert_eq!(options.form, "register");
                assert_eq!(
                    options.fields,
                    vec![
                        ("email".to_string(), "a@b.com".to_string()),
                        ("password".to_string(), "a=b=c".to_string()),
                    ]
                );
                assert_eq!(options.universes, vec!["s1", "s128"]);
                assert_eq!(options.min_password_length, 8);
                assert!(!options.json);
            },
        );
    }

    #[test]
    fn test_field_requires_separator() {
        let result = new().try_get_matches_from(vec![
            "formgate", "check", "--form", "login", "--field", "email",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_form_is_rejected() {
        let result = new().try_get_matches_from(vec!["formgate", "check", "--form", "reset"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_submit_env() {
        temp_env::with_vars(
            [
                ("FORMGATE_ACTION_URL", Some("https://game.test/register")),
                ("FORMGATE_METHOD", Some("get")),
                ("FORMGATE_CSRF_TOKEN", Some("csrf-token")),
                ("FORMGATE_SUBMIT_TIMEOUT_SECONDS", Some("3")),
                ("FORMGATE_MIN_PASSWORD_LENGTH", Some("12")),
                ("FORMGATE_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches =
                    new().get_matches_from(vec!["formgate", "submit", "--form", "register"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
                let Some((CMD_SUBMIT, sub)) = matches.subcommand() else {
                    panic!("expected submit subcommand");
                };
                let options = submit::Options::parse(sub).unwrap_or_else(|e| panic!("{e}"));
                assert_eq!(
                    options.action_url.as_deref(),
                    Some("https://game.test/register")
                );
                assert_eq!(options.method, crate::config::SubmitMethod::Get);
                assert_eq!(
                    options
                        .csrf_token
                        .as_ref()
                        .map(|token| token.expose_secret().to_string()),
                    Some("csrf-token".to_string())
                );
                assert_eq!(options.submit_timeout_seconds, 3);
                let form = form::Options::parse(sub).unwrap_or_else(|e| panic!("{e}"));
                assert_eq!(form.min_password_length, 12);
            },
        );
    }

    #[test]
    fn test_submit_defaults() {
        temp_env::with_vars(
            [
                ("FORMGATE_ACTION_URL", None::<&str>),
                ("FORMGATE_METHOD", None),
                ("FORMGATE_CSRF_TOKEN", None),
                ("FORMGATE_SUBMIT_TIMEOUT_SECONDS", None),
            ],
            || {
                let matches =
                    new().get_matches_from(vec!["formgate", "submit", "--form", "login"]);
                let Some((CMD_SUBMIT, sub)) = matches.subcommand() else {
                    panic!("expected submit subcommand");
                };
                let options = submit::Options::parse(sub).unwrap_or_else(|e| panic!("{e}"));
                assert_eq!(options.action_url, None);
                assert_eq!(options.method, crate::config::SubmitMethod::Post);
                assert!(options.csrf_token.is_none());
                assert_eq!(options.submit_timeout_seconds, 10);
            },
        );
    }

    #[test]
    fn test_method_ignores_case() {
        temp_env::with_vars(
            [
                ("FORMGATE_ACTION_URL", None::<&str>),
                ("FORMGATE_METHOD", Some("GET")),
            ],
            || {
                let matches =
                    new().get_matches_from(vec!["formgate", "submit", "--form", "login"]);
                let Some((CMD_SUBMIT, sub)) = matches.subcommand() else {
                    panic!("expected submit subcommand");
                };
                let options = submit::Options::parse(sub).unwrap_or_else(|e| panic!("{e}"));
                assert_eq!(options.method, crate::config::SubmitMethod::Get);
            },
        );
        temp_env::with_vars([("FORMGATE_METHOD", None::<&str>)], || {
            let matches = new().get_matches_from(vec![
                "formgate", "submit", "--form", "login", "--method", "Post",
            ]);
            let Some((CMD_SUBMIT, sub)) = matches.subcommand() else {
                panic!("expected submit subcommand");
            };
            let options = submit::Options::parse(sub).unwrap_or_else(|e| panic!("{e}"));
            assert_eq!(options.method, crate::config::SubmitMethod::Post);
        });
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = new().try_get_matches_from(vec![
            "formgate",
            "submit",
            "--form",
            "login",
            "--submit-timeout-seconds",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("FORMGATE_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["formgate", "check", "--form", "login"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_verbosity_flag_after_subcommand() {
        temp_env::with_vars([("FORMGATE_LOG_LEVEL", None::<&str>)], || {
            let matches =
                new().get_matches_from(vec!["formgate", "check", "--form", "login", "-vvv"]);
            assert_eq!(
                matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                Some(3)
            );
        });
    }
}
