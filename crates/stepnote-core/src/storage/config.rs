//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default note card color
//! - Writing prompt settings
//! - A custom milestone table override
//!
//! Configuration is stored at `~/.config/stepnote/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ValidationError;
use crate::milestone::{Milestone, MilestoneTable};
use crate::note;

use super::data_dir;

/// Note appearance configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesConfig {
    #[serde(default = "default_note_color")]
    pub default_color: String,
}

/// Writing prompt configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/stepnote/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notes: NotesConfig,
    #[serde(default)]
    pub prompts: PromptsConfig,
    /// Custom milestone table override. When unset, the built-in table
    /// is used.
    #[serde(default)]
    pub milestones: Option<Vec<Milestone>>,
}

fn default_note_color() -> String {
    note::PALETTE[2].to_string()
}
fn default_true() -> bool {
    true
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            default_color: default_note_color(),
        }
    }
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes: NotesConfig::default(),
            prompts: PromptsConfig::default(),
            milestones: None,
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path()?, content)?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// The effective milestone table: the validated custom override when
    /// one is configured, otherwise the built-in table.
    ///
    /// # Errors
    /// Returns an error if a configured override is empty, has a zero
    /// threshold, or is not strictly ascending.
    pub fn milestone_table(&self) -> Result<MilestoneTable, ValidationError> {
        match &self.milestones {
            Some(custom) => MilestoneTable::new(custom.clone()),
            None => Ok(MilestoneTable::default()),
        }
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist the result.
    ///
    /// # Errors
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// as the existing value's type, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }

    fn set_json_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err("config key is empty".into());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current
                    .get_mut(part)
                    .ok_or_else(|| format!("unknown config key: {key}"))?;
                continue;
            }

            let obj = current
                .as_object_mut()
                .ok_or_else(|| format!("unknown config key: {key}"))?;
            let existing = obj
                .get(part)
                .ok_or_else(|| format!("unknown config key: {key}"))?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(value.parse::<bool>()?),
                serde_json::Value::Number(_) => {
                    let n = value
                        .parse::<u64>()
                        .map_err(|_| format!("cannot parse '{value}' as number"))?;
                    serde_json::Value::Number(n.into())
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value)?
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(format!("unknown config key: {key}").into())
    }
}
