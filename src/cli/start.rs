use crate::cli::{
    actions::Action,
    commands::{self, logging},
    dispatch, telemetry,
};
use anyhow::Result;

/// Parses the command line, installs logging and resolves the action to run.
///
/// # Errors
///
/// Returns an error if telemetry cannot be installed or the arguments do not
/// describe a runnable action
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();
    telemetry::init(logging::level(&matches))?;
    dispatch::handler(&matches)
}
