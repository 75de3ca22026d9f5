use crate::{
    cli::actions::{FormInput, check::Report},
    config::EngineConfig,
    form::{FormEngine, FormEvent, MemorySurface, SubmissionPhase},
    session::{Finished, FormSession, SessionEnd},
    transport::{HttpSubmitter, Submitter},
};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::fmt::Write as _;
use tokio::sync::mpsc;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub input: FormInput,
    pub config: EngineConfig,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SubmitReport {
    #[serde(flatten)]
    report: Report,
    navigated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

/// Execute the submit action.
/// # Errors
/// Returns an error if the form cannot be built, is not submittable, is
/// rejected by the destination, or never leads to a page transition.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let timeout = args.config.submit_timeout;
    let engine = args.input.engine(args.config)?;
    let submitter = HttpSubmitter::new().context("failed to build HTTP client")?;
    let finished = drive(engine, submitter).await?;

    let location = match &finished.end {
        SessionEnd::Navigated { location } => Some(location.clone().unwrap_or_default()),
        SessionEnd::Closed => None,
    };
    let report = Report::from_engine(&finished.engine);
    let outcome = SubmitReport {
        navigated: location.is_some(),
        location: location.filter(|location| !location.is_empty()),
        report,
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", outcome.report.to_text());
        if outcome.navigated {
            println!(
                "navigated: {}",
                outcome.location.as_deref().unwrap_or("(no location)")
            );
        }
    }

    if outcome.navigated {
        return Ok(());
    }
    match finished.engine.phase() {
        SubmissionPhase::Failed => bail!("submission rejected by the destination"),
        SubmissionPhase::Idle if outcome.report.submittable => bail!(
            "no page transition within {}s; the form was re-enabled",
            timeout.as_secs()
        ),
        _ => bail!("form {} is not submittable", outcome.report.form),
    }
}

/// Raises a single submit attempt and runs the session until it settles.
///
/// # Errors
/// Returns an error if the session driver fails.
pub async fn drive<T: Submitter>(
    engine: FormEngine<MemorySurface>,
    submitter: T,
) -> Result<Finished<MemorySurface>> {
    let (tx, rx) = mpsc::channel(1);
    tx.send(FormEvent::Submit)
        .await
        .context("event channel closed")?;
    drop(tx);
    Ok(FormSession::new(engine, submitter).run(rx).await?)
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("form", args.input.form.clone()),
        ("destination", args.config.destination.to_string()),
        ("method", args.config.method.to_string()),
        ("csrf_token_set", args.config.csrf_token.is_some().to_string()),
        (
            "submit_timeout",
            format!("{}s", args.config.submit_timeout.as_secs()),
        ),
        (
            "min_password_length",
            args.config.min_password_length.to_string(),
        ),
        ("fields", args.input.fields.len().to_string()),
    ];
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!(
        "formgate {} - {}\n\nSubmit configuration:",
        env!("CARGO_PKG_VERSION"),
        short_commit(crate::GIT_COMMIT_HASH)
    );
    for (key, value) in &entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ = write!(message, "\n  {key}:{padding} {value}");
    }
    info!("{message}");
}

fn short_commit(hash: &str) -> String {
    let trimmed = hash.trim();
    if trimmed.len() > 7 {
        trimmed[..7].to_string()
    } else {
        trimmed.to_string()
    }
}
