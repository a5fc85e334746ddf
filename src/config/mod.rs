use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{
    fmt::Write as _,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::utils::{ensure_dir, PathResolver};
use crate::errors::{ClassBookError, Result};

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store key the class collection is saved under.
    pub collection_key: String,
    /// Number of previous collection versions kept on disk.
    pub backup_retention: usize,
    /// `chrono` format string for attendance dates shown to users.
    pub date_display_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            collection_key: "classes".into(),
            backup_retention: 5,
            date_display_format: "%A, %d/%m/%Y".into(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.collection_key.trim().is_empty() {
            return Err(ClassBookError::Validation(
                "collection_key must not be empty".into(),
            ));
        }
        if self.backup_retention == 0 {
            return Err(ClassBookError::Validation(
                "backup_retention must be at least 1".into(),
            ));
        }
        let sample = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap_or_default();
        render_date(sample, &self.date_display_format)?;
        Ok(())
    }
}

/// Formats `date` with a user-supplied `chrono` format. Specifiers a plain
/// date cannot fill, such as `%H` or `%z`, are a `Validation` error.
pub fn render_date(date: NaiveDate, format: &str) -> Result<String> {
    let invalid = || {
        ClassBookError::Validation(format!(
            "date_display_format `{}` cannot format a calendar date",
            format
        ))
    };
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }
    let mut rendered = String::new();
    write!(rendered, "{}", date.format(format)).map_err(|_| invalid())?;
    Ok(rendered)
}

/// Reads and writes `config.json` in the application directory.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    /// Loads the config, falling back to defaults when no file exists yet.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)
            .map_err(|err| ClassBookError::Validation(format!("config.json: {}", err)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
