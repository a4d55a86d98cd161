// src/config.rs
use anyhow::{Context, Result, anyhow};
use home::home_dir;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk contents of the config store: a flat key-value map.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigData {
    pub settings: BTreeMap<String, String>,
}

/// Default values for every known key. New keys added here are migrated
/// into existing stores on the next load.
fn default_settings() -> BTreeMap<String, String> {
    [
        ("port", "8080"),
        ("upload_dir", "uploads"),
        ("logs_dir", "logs"),
        ("file_bin", "file"),
        ("checksec_bin", "checksec"),
        ("strings_bin", "strings"),
        ("nm_bin", "nm"),
        ("readelf_bin", "readelf"),
        ("ghidra_dir", "ghidra"),
        ("decompile_script", "decompile/decompile_script.py"),
        ("tool_timeout_secs", "30"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// JSON key-value store at `~/.elfscout/config.json`.
///
/// Created with defaults when missing; when new default keys are
/// introduced, existing stores are migrated by inserting the missing keys
/// without touching the values already set.
pub struct ConfigStore {
    store_path: PathBuf,
}

impl ConfigStore {
    pub fn new() -> Result<Self> {
        let home = home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
        let dir = home.join(".elfscout");
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(Self {
            store_path: dir.join("config.json"),
        })
    }

    /// Store backed by an explicit path; used by tests.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.store_path
    }

    /// Load the store, creating it with defaults when absent and migrating
    /// in any default keys it is missing.
    pub fn load(&self) -> Result<ConfigData> {
        if !self.store_path.exists() {
            let data = ConfigData {
                settings: default_settings(),
            };
            self.save(&data)?;
            tracing::info!("default config created at {}", self.store_path.display());
            return Ok(data);
        }

        let content = fs::read_to_string(&self.store_path)?;
        let mut data: ConfigData = serde_json::from_str(&content)
            .with_context(|| format!("malformed config store at {}", self.store_path.display()))?;

        let mut updated = false;
        for (key, value) in default_settings() {
            if !data.settings.contains_key(&key) {
                data.settings.insert(key, value);
                updated = true;
            }
        }
        if updated {
            self.save(&data)?;
            tracing::info!(
                "config migrated with new default keys at {}",
                self.store_path.display()
            );
        }
        Ok(data)
    }

    pub fn save(&self, data: &ConfigData) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&self.store_path, json)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.settings.get(key).cloned())
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut data = self.load()?;
        data.settings.insert(key.to_string(), value.to_string());
        self.save(&data)
    }
}

/// Resolved runtime configuration.
///
/// Built once at startup from the config store with environment overrides,
/// then passed by value into every component that needs it — nothing reads
/// ambient global state.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub upload_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub file_bin: String,
    pub checksec_bin: String,
    pub strings_bin: String,
    pub nm_bin: String,
    pub readelf_bin: String,
    pub ghidra_dir: PathBuf,
    pub decompile_script: PathBuf,
    pub tool_timeout_secs: u64,
}

impl Config {
    /// Resolve from the given store. Each key can be overridden by the
    /// matching upper-cased environment variable (e.g. `CHECKSEC_BIN`).
    pub fn load(store: &ConfigStore) -> Result<Self> {
        dotenvy::dotenv().ok();
        let settings = store.load()?.settings;

        let get = |key: &str| -> String {
            std::env::var(key.to_uppercase())
                .ok()
                .or_else(|| settings.get(key).cloned())
                .unwrap_or_default()
        };

        Ok(Config {
            port: get("port")
                .parse()
                .with_context(|| "invalid 'port' setting")?,
            upload_dir: PathBuf::from(get("upload_dir")),
            logs_dir: PathBuf::from(get("logs_dir")),
            file_bin: get("file_bin"),
            checksec_bin: get("checksec_bin"),
            strings_bin: get("strings_bin"),
            nm_bin: get("nm_bin"),
            readelf_bin: get("readelf_bin"),
            ghidra_dir: PathBuf::from(get("ghidra_dir")),
            decompile_script: PathBuf::from(get("decompile_script")),
            tool_timeout_secs: get("tool_timeout_secs")
                .parse()
                .with_context(|| "invalid 'tool_timeout_secs' setting")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        let settings = default_settings();
        let get = |key: &str| settings.get(key).cloned().unwrap_or_default();
        Config {
            port: 8080,
            upload_dir: PathBuf::from(get("upload_dir")),
            logs_dir: PathBuf::from(get("logs_dir")),
            file_bin: get("file_bin"),
            checksec_bin: get("checksec_bin"),
            strings_bin: get("strings_bin"),
            nm_bin: get("nm_bin"),
            readelf_bin: get("readelf_bin"),
            ghidra_dir: PathBuf::from(get("ghidra_dir")),
            decompile_script: PathBuf::from(get("decompile_script")),
            tool_timeout_secs: 30,
        }
    }
}
