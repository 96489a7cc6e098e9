use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::normalize::Naming;
use crate::data::weighting::{PowerLaw, DEFAULT_EXPONENT, DEFAULT_SCALE};

/// Parameters of one analysis run.
///
/// Every field is optional in a JSON config file:
///
/// ```json
/// { "scale": 4.5167, "exponent": -0.228, "drop_last_second": true }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// `a` in `a · t^b`.
    pub scale: f64,
    /// `b` in `a · t^b`.
    pub exponent: f64,
    /// Hide the trailing (partial) second from plots and the aggregate view.
    pub drop_last_second: bool,
    /// Name emotion columns by display name instead of tool identifier.
    pub translate: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            exponent: DEFAULT_EXPONENT,
            drop_last_second: false,
            translate: true,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text).context("parsing config JSON")
    }

    pub fn power_law(&self) -> PowerLaw {
        PowerLaw::new(self.scale, self.exponent)
    }

    pub fn naming(&self) -> Naming {
        if self.translate {
            Naming::Display
        } else {
            Naming::Identifier
        }
    }
}
