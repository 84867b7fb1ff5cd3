use crate::error::{FilaError, Result};
use crate::types::VolumeId;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Name the host plugin registers under.
pub const DEFAULT_PLUGIN_NAME: &str = "Filesystem";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilaConfig {
    pub plugin_name: String,
    pub write_policy: WritePolicy,
    pub defaults: Defaults,
}

/// What `write_text` does with a failed host call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    /// Log the failure and report success.
    #[default]
    BestEffort,
    /// Return the failure to the caller.
    Strict,
}

/// Process-wide roots used when a handle is built without an explicit path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Defaults {
    pub sep: char,
    pub cwd: VolumeId,
    pub tmp: VolumeId,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            sep: '/',
            cwd: VolumeId::Data,
            tmp: VolumeId::Cache,
        }
    }
}

impl Default for FilaConfig {
    fn default() -> Self {
        Self {
            plugin_name: DEFAULT_PLUGIN_NAME.into(),
            write_policy: WritePolicy::BestEffort,
            defaults: Defaults::default(),
        }
    }
}

impl FilaConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| FilaError::Config(format!("read {}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.plugin_name.is_empty() {
            return Err(FilaError::Config("plugin_name must not be empty".into()));
        }
        if self.defaults.sep.is_alphanumeric() || self.defaults.sep == '.' {
            return Err(FilaError::Config(format!(
                "invalid path separator: {:?}",
                self.defaults.sep
            )));
        }
        Ok(())
    }
}

static DEFAULTS: OnceLock<Defaults> = OnceLock::new();

/// Establish the process-wide default roots. Succeeds once per process.
pub fn set_defaults(defaults: Defaults) -> Result<()> {
    DEFAULTS
        .set(defaults)
        .map_err(|_| FilaError::DefaultsAlreadySet)?;
    tracing::debug!(sep = %defaults.sep, cwd = %defaults.cwd, tmp = %defaults.tmp, "default roots set");
    Ok(())
}

/// The default roots, falling back to `/`, `data`, `cache` if never set.
pub fn defaults() -> Defaults {
    DEFAULTS.get().copied().unwrap_or_default()
}
