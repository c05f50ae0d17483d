use crate::consts::{DEFAULT_MODEL_FORMAT, DEFAULT_VIEW_FORMAT};
use crate::prelude::*;

/// The pair of formats in effect for one evaluation: `view` is what the
/// user reads and types, `model` is the stored canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "view={view} model={model}")]
pub struct FormatPair {
    pub view: String,
    pub model: String,
}

impl Default for FormatPair {
    fn default() -> Self {
        Self {
            view: DEFAULT_VIEW_FORMAT.to_owned(),
            model: DEFAULT_MODEL_FORMAT.to_owned(),
        }
    }
}

/// The four independently settable format strings of the host surface.
/// Overrides win over bases when present and non-empty; an empty or unset
/// string falls through to the next layer, ending at the built-in
/// defaults. No validation happens here; a bad format string surfaces as
/// a parse failure downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatConfig {
    pub base_view: Option<String>,
    pub base_model: Option<String>,
    pub override_view: Option<String>,
    pub override_model: Option<String>,
}

fn pick(layers: [Option<&str>; 2], built_in: &str) -> String {
    layers
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or(built_in)
        .to_owned()
}

impl FormatConfig {
    /// Resolves the effective format pair for the current configuration.
    /// Pure; called once per evaluation.
    pub fn resolve(&self) -> FormatPair {
        FormatPair {
            view: pick(
                [self.override_view.as_deref(), self.base_view.as_deref()],
                DEFAULT_VIEW_FORMAT,
            ),
            model: pick(
                [self.override_model.as_deref(), self.base_model.as_deref()],
                DEFAULT_MODEL_FORMAT,
            ),
        }
    }
}
