//! Configuration management
//!
//! Settings live in `settings.json` in the data directory:
//! ```json
//! {
//!   "bank": { "balanceFile": "balance.txt", "defaultBalance": "1000" },
//!   "notes": { "dir": "notes", "jsonKeys": "snake", "prettyJson": false }
//! }
//! ```
//! Keys this crate does not know about are kept when saving.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::adapters::text_file::DEFAULT_BALANCE_FILE;
use crate::domain::result::Error;
use crate::domain::{JsonKeyStyle, DEFAULT_OPENING_BALANCE};

const SETTINGS_FILE: &str = "settings.json";
const DEFAULT_NOTES_DIR: &str = "notes";
const ENV_DEFAULT_BALANCE: &str = "TALLY_DEFAULT_BALANCE";
const ENV_JSON_KEYS: &str = "TALLY_JSON_KEYS";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    bank: BankSettings,
    #[serde(default)]
    notes: NotesSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BankSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    balance_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_balance: Option<Decimal>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotesSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    json_keys: Option<JsonKeyStyle>,
    #[serde(default)]
    pretty_json: bool,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Tally configuration (resolved view of settings + environment)
#[derive(Debug, Clone)]
pub struct Config {
    /// Balance file name, relative to the data directory
    pub balance_file: String,
    /// Balance used when the balance file is missing or unreadable
    pub default_balance: Decimal,
    /// Notes directory, relative to the data directory
    pub notes_dir: String,
    pub json_keys: JsonKeyStyle,
    pub pretty_json: bool,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            balance_file: DEFAULT_BALANCE_FILE.to_string(),
            default_balance: DEFAULT_OPENING_BALANCE,
            notes_dir: DEFAULT_NOTES_DIR.to_string(),
            json_keys: JsonKeyStyle::default(),
            pretty_json: false,
            _raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the data directory
    ///
    /// Environment overrides (for scripting and tests):
    /// - `TALLY_DEFAULT_BALANCE`: opening balance, e.g. `0`
    /// - `TALLY_JSON_KEYS`: `snake` or `pascal`
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut config = Self::load_file(data_dir)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load only what `settings.json` says, without environment overrides.
    /// Use this before [`Config::save`] so overrides are not persisted.
    pub fn load_file(data_dir: &Path) -> Result<Self> {
        let config = Self::from_raw(read_settings(&settings_path(data_dir))?);
        non_negative("bank.defaultBalance", config.default_balance)?;
        Ok(config)
    }

    fn apply_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = var(ENV_DEFAULT_BALANCE) {
            let balance = Decimal::from_str(value.trim()).map_err(|_| {
                Error::Config(format!("Invalid {}: {}", ENV_DEFAULT_BALANCE, value))
            })?;
            self.default_balance = non_negative(ENV_DEFAULT_BALANCE, balance)?;
        }
        if let Some(value) = var(ENV_JSON_KEYS) {
            self.json_keys = JsonKeyStyle::parse(value.trim())
                .ok_or_else(|| Error::Config(format!("Invalid {}: {}", ENV_JSON_KEYS, value)))?;
        }
        Ok(())
    }

    /// Set one setting by its `settings.json` name
    /// (`balanceFile`, `defaultBalance`, `notesDir`, `jsonKeys`, `prettyJson`)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "balanceFile" => self.balance_file = non_empty(key, value)?,
            "defaultBalance" => {
                let balance = Decimal::from_str(value)
                    .with_context(|| format!("Invalid {}: {}", key, value))?;
                self.default_balance = non_negative(key, balance)?;
            }
            "notesDir" => self.notes_dir = non_empty(key, value)?,
            "jsonKeys" => {
                self.json_keys = JsonKeyStyle::parse(value)
                    .with_context(|| format!("Invalid {}: {} (use snake or pascal)", key, value))?
            }
            "prettyJson" => {
                self.pretty_json = value
                    .parse()
                    .with_context(|| format!("Invalid {}: {} (use true or false)", key, value))?
            }
            _ => bail!("Unknown setting: {}", key),
        }
        Ok(())
    }

    fn from_raw(raw: SettingsFile) -> Self {
        let defaults = Self::default();
        Self {
            balance_file: raw
                .bank
                .balance_file
                .clone()
                .unwrap_or(defaults.balance_file),
            default_balance: raw.bank.default_balance.unwrap_or(defaults.default_balance),
            notes_dir: raw.notes.dir.clone().unwrap_or(defaults.notes_dir),
            json_keys: raw.notes.json_keys.unwrap_or_default(),
            pretty_json: raw.notes.pretty_json,
            _raw_settings: raw,
        }
    }

    /// Save config to the data directory
    /// Preserves other settings that tally doesn't manage
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let path = settings_path(data_dir);
        let mut settings = read_settings(&path).unwrap_or_else(|_| self._raw_settings.clone());

        settings.bank.balance_file = Some(self.balance_file.clone());
        settings.bank.default_balance = Some(self.default_balance);
        settings.notes.dir = Some(self.notes_dir.clone());
        settings.notes.json_keys = Some(self.json_keys);
        settings.notes.pretty_json = self.pretty_json;

        std::fs::create_dir_all(data_dir)?;
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    pub fn balance_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.balance_file)
    }

    pub fn notes_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.notes_dir)
    }
}

/// An opening balance below zero would start the account negative
fn non_negative(source: &str, balance: Decimal) -> Result<Decimal> {
    if balance < Decimal::ZERO {
        return Err(Error::Config(format!("{} must not be negative: {}", source, balance)).into());
    }
    Ok(balance)
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        bail!("Invalid {}: must not be empty", key);
    }
    Ok(value.to_string())
}

fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SETTINGS_FILE)
}

fn read_settings(path: &Path) -> Result<SettingsFile> {
    if !path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).with_context(|| format!("Invalid settings file: {}", path.display()))
}
