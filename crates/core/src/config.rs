//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the personaliser.
//! Nothing in this crate reads environment variables; the binary reads
//! [`crate::constants::CONFIG_ENV_VAR`] and hands the value to [`resolve_config_path`].

use crate::constants::DEFAULT_STAMP_KEY;
use crate::{CoreError, CoreResult};
use chatlens_types::ResourceKey;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    item_kinds: Vec<ResourceKey>,
    stamp_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CoreConfigWire {
    #[serde(default)]
    item_kinds: Vec<String>,
    #[serde(default = "default_stamp_key")]
    stamp_key: String,
}

fn default_stamp_key() -> String {
    DEFAULT_STAMP_KEY.to_owned()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            item_kinds: Vec::new(),
            stamp_key: default_stamp_key(),
        }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if `stamp_key` is empty or whitespace.
    pub fn new(item_kinds: Vec<ResourceKey>, stamp_key: impl Into<String>) -> CoreResult<Self> {
        let stamp_key = stamp_key.into();
        if stamp_key.trim().is_empty() {
            return Err(CoreError::InvalidInput("stamp_key cannot be empty".into()));
        }

        Ok(Self {
            item_kinds,
            stamp_key,
        })
    }

    /// Parse configuration from YAML text.
    ///
    /// Unknown keys are rejected, and schema errors carry the path of the offending field.
    pub fn from_yaml_str(yaml_text: &str) -> CoreResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        let wire: CoreConfigWire =
            serde_path_to_error::deserialize(deserializer).map_err(|err| {
                let path = err.path().to_string();
                CoreError::ConfigSchema {
                    path: if path == "." { "<root>".into() } else { path },
                    source: err.into_inner(),
                }
            })?;

        let item_kinds = wire
            .item_kinds
            .into_iter()
            .map(|value| {
                ResourceKey::parse(&value)
                    .map_err(|source| CoreError::InvalidItemKind { value, source })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        Self::new(item_kinds, wire.stamp_key)
    }

    /// Read and parse a YAML config file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!(
            "loaded config from {} ({} item kinds)",
            path.display(),
            config.item_kinds.len()
        );
        Ok(config)
    }

    /// Add item kinds on top of the configured ones, skipping duplicates.
    pub fn with_extra_item_kinds(mut self, extra: impl IntoIterator<Item = ResourceKey>) -> Self {
        for kind in extra {
            if !self.item_kinds.contains(&kind) {
                self.item_kinds.push(kind);
            }
        }
        self
    }

    pub fn item_kinds(&self) -> &[ResourceKey] {
        &self.item_kinds
    }

    pub fn stamp_key(&self) -> &str {
        &self.stamp_key
    }
}

/// Pick the config file to load without reading environment variables.
///
/// An explicit override wins over the environment value; blank values are ignored. `None`
/// means the built-in defaults apply.
pub fn resolve_config_path(
    override_path: Option<PathBuf>,
    env_value: Option<String>,
) -> Option<PathBuf> {
    override_path.or_else(|| {
        env_value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}
