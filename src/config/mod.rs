use crate::errors::{AppError, AppResult};
use crate::models::Shift;
use crate::store::DEFAULT_SHEET;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_store_file")]
    pub store_file: String,
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    #[serde(default = "default_shift")]
    pub default_shift: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_store_file() -> String {
    Config::store_path_default().to_string_lossy().to_string()
}
fn default_sheet_name() -> String {
    DEFAULT_SHEET.to_string()
}
fn default_shift() -> String {
    Shift::Morning.label().to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_file: default_store_file(),
            sheet_name: default_sheet_name(),
            default_shift: default_shift(),
            log_level: default_log_level(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rmachlogger")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rmachlogger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rmachlogger.conf")
    }

    /// Default location of the log workbook
    pub fn store_path_default() -> PathBuf {
        Self::config_dir().join("machine_logs.xlsx")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))
    }

    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| AppError::Config(format!("cannot serialize configuration: {e}")))?;
        fs::write(Self::config_file(), yaml)?;
        Ok(())
    }

    /// Store path with `~/` expanded.
    pub fn store_path(&self) -> PathBuf {
        expand_tilde(&self.store_file)
    }

    pub fn shift(&self) -> AppResult<Shift> {
        Shift::from_label(&self.default_shift)
            .ok_or_else(|| AppError::InvalidShift(self.default_shift.clone()))
    }

    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }

    /// Problems a user should fix in the configuration file.
    pub fn check(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.store_file.trim().is_empty() {
            problems.push("store_file is empty".to_string());
        }
        if self.sheet_name.trim().is_empty() {
            problems.push("sheet_name is empty".to_string());
        }
        // Excel limits sheet names to 31 characters and forbids []:*?/\
        if self.sheet_name.chars().count() > 31
            || self.sheet_name.contains(['[', ']', ':', '*', '?', '/', '\\'])
        {
            problems.push(format!("sheet_name '{}' is not a valid sheet name", self.sheet_name));
        }
        if Shift::from_label(&self.default_shift).is_none() {
            problems.push(format!("default_shift '{}' is not a known shift", self.default_shift));
        }
        if tracing_subscriber::EnvFilter::try_new(&self.log_level).is_err() {
            problems.push(format!("log_level '{}' is not a valid filter", self.log_level));
        }
        if self.separator_char.chars().count() != 1 {
            problems.push("separator_char must be a single character".to_string());
        }

        problems
    }
}
