use crate::cli::actions::{Action, check, submit};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Check(args) => check::execute(args),
        Action::Submit(args) => submit::execute(args).await,
    }
}
