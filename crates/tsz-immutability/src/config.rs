//! Override configuration.
//!
//! ```json
//! {
//!   "overrides": [
//!     { "type": { "name": "Map" }, "to": "ReadonlyDeep" },
//!     { "type": { "pattern": "^Readonly" }, "to": "ReadonlyDeep", "from": "ReadonlyShallow" }
//!   ],
//!   "extendDefaults": true
//! }
//! ```
//!
//! User rules come first, so they take precedence over the defaults appended
//! by `extendDefaults`.

use crate::lattice::Immutability;
use crate::overrides::{ImmutabilityOverride, OverrideTable, TypeMatcher, default_overrides};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid immutability config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid type pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// How a configured rule selects types.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeSpecifier {
    Name(String),
    Pattern(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OverrideSpec {
    #[serde(rename = "type")]
    pub type_specifier: TypeSpecifier,
    pub to: Immutability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Immutability>,
}

impl OverrideSpec {
    pub fn compile(&self) -> Result<ImmutabilityOverride, ConfigError> {
        let matcher = match &self.type_specifier {
            TypeSpecifier::Name(name) => TypeMatcher::name(name.as_str()),
            TypeSpecifier::Pattern(pattern) => {
                TypeMatcher::pattern(pattern).map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?
            }
        };
        Ok(ImmutabilityOverride {
            matcher,
            to: self.to,
            from: self.from,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImmutabilityConfig {
    #[serde(default)]
    pub overrides: Vec<OverrideSpec>,
    /// Append the default `Map`/`Set` rules after `overrides`.
    #[serde(default)]
    pub extend_defaults: bool,
}

impl ImmutabilityConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading immutability config");
        Self::from_json_str(&text)
    }

    /// Compile the configured rules, in order.
    pub fn to_override_table(&self) -> Result<OverrideTable, ConfigError> {
        let rules = self
            .overrides
            .iter()
            .map(OverrideSpec::compile)
            .collect::<Result<Vec<_>, _>>()?;
        let mut table = OverrideTable::from_rules(rules);
        if self.extend_defaults {
            table.extend(default_overrides());
        }
        debug!(rules = table.len(), "compiled immutability overrides");
        Ok(table)
    }
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;
