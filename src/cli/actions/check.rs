use crate::{
    cli::actions::FormInput,
    config::EngineConfig,
    form::{FieldId, FormEngine, FormEvent, MemorySurface, StrengthTier, SubmissionPhase},
};
use anyhow::{Result, bail};
use serde::Serialize;
use std::fmt::Write as _;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub input: FormInput,
    pub config: EngineConfig,
    pub json: bool,
}

/// What the page shows after a submit attempt.
#[derive(Debug, Serialize)]
pub struct Report {
    pub form: String,
    pub submittable: bool,
    pub phase: SubmissionPhase,
    pub strength: Option<StrengthLine>,
    pub fields: Vec<FieldLine>,
    pub general_errors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct StrengthLine {
    pub tier: StrengthTier,
    pub label: &'static str,
    pub percent: u8,
}

#[derive(Debug, Serialize)]
pub struct FieldLine {
    pub field: FieldId,
    pub valid: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl Report {
    #[must_use]
    pub fn from_engine(engine: &FormEngine<MemorySurface>) -> Self {
        let spec = engine.spec();
        let surface = engine.surface();
        let fields = spec
            .fields
            .iter()
            .filter_map(|field| {
                let verdict = engine.state().verdict(&field.id)?;
                Some(FieldLine {
                    field: field.id.clone(),
                    valid: verdict.is_valid(),
                    message: surface.error(field.id.as_str()).unwrap_or("").to_string(),
                })
            })
            .collect();
        let strength = spec.strength_meter.then(|| StrengthLine {
            tier: surface.strength,
            label: surface.strength.label(),
            percent: surface.strength.percent(),
        });

        Self {
            form: spec.name.clone(),
            submittable: engine.state().submittable(),
            phase: engine.phase(),
            strength,
            fields,
            general_errors: surface.general_errors.clone(),
        }
    }

    /// Plain-text rendering for terminals.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = format!("form: {}\nsubmittable: {}\n", self.form, self.submittable);
        if let Some(strength) = &self.strength {
            let _ = writeln!(out, "strength: {} ({}%)", strength.label, strength.percent);
        }
        let width = self
            .fields
            .iter()
            .map(|line| line.field.as_str().len())
            .max()
            .unwrap_or(0);
        for line in &self.fields {
            let status = if line.valid { "ok" } else { "invalid" };
            let name = line.field.as_str();
            let row = format!("  {name:<width$}  {status:<7}  {}", line.message);
            let _ = writeln!(out, "{}", row.trim_end());
        }
        for message in &self.general_errors {
            let _ = writeln!(out, "error: {message}");
        }
        out
    }

    /// Prints the report to stdout.
    ///
    /// # Errors
    /// Returns an error if JSON serialization fails.
    pub fn print(&self, json: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(self)?);
        } else {
            print!("{}", self.to_text());
        }
        Ok(())
    }
}

/// Runs a submit attempt that is never sent. The reported phase is the one
/// the page was in before the attempt.
pub fn inspect(engine: &mut FormEngine<MemorySurface>) -> Report {
    let phase = engine.phase();
    if engine.handle(FormEvent::Submit).is_some() {
        debug!(form = %engine.spec().name, "form accepted; nothing is sent by check");
    }
    Report {
        phase,
        ..Report::from_engine(engine)
    }
}

/// Execute the check action.
/// # Errors
/// Returns an error if the form cannot be built or is not submittable.
pub fn execute(args: Args) -> Result<()> {
    let mut engine = args.input.engine(args.config)?;
    let report = inspect(&mut engine);
    report.print(args.json)?;

    if !report.submittable {
        bail!("form {} is not submittable", report.form);
    }
    Ok(())
}
