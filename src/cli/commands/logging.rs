//! Log verbosity. Repeated `-v` flags and `FORMGATE_LOG_LEVEL` share one scale:
//! nothing selects ERROR and every step adds the next level down to TRACE.

use clap::{Arg, ArgAction, ArgMatches, Command, builder::ValueParser};
use tracing::Level;

pub const ARG_VERBOSITY: &str = "verbosity";

const LEVELS: [Level; 5] = [
    Level::ERROR,
    Level::WARN,
    Level::INFO,
    Level::DEBUG,
    Level::TRACE,
];

/// Accepts a level name in any case or a step count.
fn parse_verbosity(value: &str) -> Result<u8, String> {
    let value = value.trim();
    if let Ok(steps) = value.parse::<u8>() {
        return Ok(steps);
    }
    LEVELS
        .iter()
        .position(|level| level.as_str().eq_ignore_ascii_case(value))
        .and_then(|steps| u8::try_from(steps).ok())
        .ok_or_else(|| format!("invalid log level `{value}` (error, warn, info, debug, trace)"))
}

/// Level selected on the command line, ERROR when nothing was asked for.
#[must_use]
pub fn level(matches: &ArgMatches) -> Level {
    let steps = matches.get_one::<u8>(ARG_VERBOSITY).copied().unwrap_or(0);
    LEVELS[usize::from(steps).min(LEVELS.len() - 1)]
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Increase log output: -v warn, -vv info, -vvv debug, -vvvv trace")
            .env("FORMGATE_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(ValueParser::from(parse_verbosity)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(args: &[&str]) -> ArgMatches {
        with_args(Command::new("formgate")).get_matches_from(args)
    }

    #[test]
    fn names_and_counts_share_one_scale() {
        assert_eq!(parse_verbosity("error"), Ok(0));
        assert_eq!(parse_verbosity("Warn"), Ok(1));
        assert_eq!(parse_verbosity(" TRACE "), Ok(4));
        assert_eq!(parse_verbosity("3"), Ok(3));
        assert!(parse_verbosity("loud").is_err());
    }

    #[test]
    fn flag_counts_select_levels() {
        temp_env::with_vars([("FORMGATE_LOG_LEVEL", None::<&str>)], || {
            assert_eq!(level(&matches(&["formgate"])), Level::ERROR);
            assert_eq!(level(&matches(&["formgate", "-v"])), Level::WARN);
            assert_eq!(level(&matches(&["formgate", "-vvv"])), Level::DEBUG);
            assert_eq!(level(&matches(&["formgate", "-vvvvvvv"])), Level::TRACE);
        });
    }
}
