//! Configuration loading from exhaustive.toml.

use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::{ExhaustiveError, ExhaustiveResult, IoResultExt};

/// Name of the optional configuration file in the base directory.
pub const CONFIG_FILE: &str = "exhaustive.toml";

/// Main configuration structure for exhaustive.toml.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExhaustiveConfig {
    /// File path patterns whose switches are not reported.
    pub ignore: Option<Vec<String>>,
    /// Analyze files in parallel.
    pub parallel: Option<bool>,
    /// Cache annotation lookups per type.
    pub memoize: Option<bool>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

impl ExhaustiveConfig {
    /// Whether `[output] format = "json"` was requested.
    pub fn wants_json(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

/// Loads configuration from exhaustive.toml if it exists.
pub fn load_config(root: &Path) -> ExhaustiveResult<Option<ExhaustiveConfig>> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).with_path(&path)?;
    let cfg: ExhaustiveConfig =
        toml::from_str(&content).map_err(|e| ExhaustiveError::config(&path, e.to_string()))?;

    if let Some(format) = cfg.output.as_ref().and_then(|o| o.format.as_deref()) {
        if !matches!(format.to_ascii_lowercase().as_str(), "plain" | "json") {
            return Err(ExhaustiveError::config(
                &path,
                format!("unknown output format {:?} (expected \"plain\" or \"json\")", format),
            ));
        }
    }

    Ok(Some(cfg))
}
