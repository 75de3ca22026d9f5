pub mod check;
pub mod submit;

// Internal "interpreter" for `Action`.
mod run;

use crate::{
    config::EngineConfig,
    form::{FieldKind, FormEngine, FormSpec, MemorySurface},
};
use anyhow::{Result, bail};

#[derive(Debug)]
pub enum Action {
    Check(check::Args),
    Submit(submit::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> Result<()> {
        run::execute(self).await
    }
}

/// Form name, select options and field values as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub form: String,
    pub universes: Vec<String>,
    pub fields: Vec<(String, String)>,
}

impl FormInput {
    /// Builds an engine over a surface holding the given values.
    ///
    /// # Errors
    /// Returns an error for an unknown form, a field the form does not have, or
    /// a checkbox value that is not on/off.
    pub fn engine(&self, config: EngineConfig) -> Result<FormEngine<MemorySurface>> {
        let universes: Vec<&str> = self.universes.iter().map(String::as_str).collect();
        let spec = FormSpec::by_name(&self.form, &universes)?;

        let mut surface = MemorySurface::new();
        for (name, value) in &self.fields {
            let Some(field) = spec.field(name) else {
                return Err(crate::Error::UnknownField(name.clone()).into());
            };
            if matches!(field.kind, FieldKind::Checkbox) {
                let Some(checked) = parse_checked(value) else {
                    bail!("invalid checkbox value for {name}: '{value}' (expected on/off)");
                };
                surface.set_checked(name.as_str(), checked);
            } else {
                surface.set_text(name.as_str(), value.as_str());
            }
        }

        Ok(FormEngine::new(spec, config, surface))
    }
}

fn parse_checked(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "on" | "1" | "true" | "yes" | "checked" => Some(true),
        "" | "off" | "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
