use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Persistence strategy behind the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub storage: StorageKind,
    /// Allowed departments; empty means free text.
    #[serde(default = "default_departments")]
    pub departments: Vec<String>,
    /// Allowed overtime categories (type / depot); empty means free text.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default = "default_status")]
    pub default_status: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_departments() -> Vec<String> {
    ["Operations", "Engineering", "HR", "Finance"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_categories() -> Vec<String> {
    ["Regular", "Holiday", "Special"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_status() -> String {
    "Pending".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}

/// Keys every complete configuration file carries.
pub const CONFIG_KEYS: [&str; 6] = [
    "database",
    "storage",
    "departments",
    "categories",
    "default_status",
    "separator_char",
];

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            storage: StorageKind::default(),
            departments: default_departments(),
            categories: default_categories(),
            default_status: default_status(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rovertime")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rovertime")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rovertime.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rovertime.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("cannot parse configuration: {e}")))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let yaml = self.to_yaml()?;
        let mut file = fs::File::create(path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Keys absent from a YAML document (they fall back to defaults on load).
    pub fn missing_keys(content: &str) -> AppResult<Vec<&'static str>> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("cannot parse configuration: {e}")))?;
        let map = value.as_mapping();
        Ok(CONFIG_KEYS
            .into_iter()
            .filter(|k| {
                map.is_none_or(|m| !m.contains_key(serde_yaml::Value::String(k.to_string())))
            })
            .collect())
    }

    /// Initialize configuration and database files.
    /// Returns the configuration that was (or would have been) written.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        // Custom paths are taken as given, the same way `--db` is for every command.
        let db_path = match custom_db {
            Some(name) => PathBuf::from(name),
            None => dir.join("rovertime.sqlite"),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // An existing config file is left as the user wrote it.
        if !is_test {
            let file = Self::config_file();
            if file.exists() {
                println!("ℹ️  Config file kept: {:?}", file);
            } else {
                config.save_to(&file)?;
                println!("✅ Config file: {:?}", file);
            }
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }

    /// Match `value` against an allowed list, case-insensitively.
    /// Returns the configured spelling; an empty list accepts anything.
    pub fn normalize_choice(allowed: &[String], value: &str) -> Option<String> {
        let v = value.trim();
        if allowed.is_empty() {
            return Some(v.to_string());
        }
        allowed
            .iter()
            .find(|a| a.eq_ignore_ascii_case(v))
            .cloned()
    }
}
