use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs;
use std::path::{Path, PathBuf};

use crate::language_utils;
use crate::validation::ValidationConfig;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language of the source strings (ISO)
    pub source_language: String,

    /// Language installed at startup
    pub default_language: String,

    /// Where catalogs live and how they are named
    #[serde(default)]
    pub catalogs: CatalogConfig,

    /// What a lookup table keeps from a catalog
    #[serde(default)]
    pub release: ReleaseConfig,

    /// Which checks `validate` runs
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Catalog discovery settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Directory holding the `.ts` files
    #[serde(default = "default_catalog_dir")]
    pub dir: PathBuf,

    /// File name prefix, `<prefix>_<language>.ts`; empty for `<language>.ts`
    #[serde(default)]
    pub prefix: String,

    /// Keep loaded translators around across language switches
    #[serde(default = "default_true")]
    pub cache_translators: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            dir: default_catalog_dir(),
            prefix: String::new(),
            cache_translators: true,
        }
    }
}

impl CatalogConfig {
    /// File name of the catalog for a language tag
    pub fn file_name(&self, language: &str) -> String {
        if self.prefix.is_empty() {
            format!("{}.ts", language)
        } else {
            format!("{}_{}.ts", self.prefix, language)
        }
    }

    /// Language tag encoded in a catalog file name, if it follows the scheme
    pub fn language_from_file_name(&self, file_name: &str) -> Option<String> {
        let stem = file_name.strip_suffix(".ts")?;
        let language = if self.prefix.is_empty() {
            stem
        } else {
            stem.strip_prefix(&self.prefix)?.strip_prefix('_')?
        };
        (!language.is_empty()).then(|| language.to_string())
    }
}

/// Options applied when building a lookup table from a catalog
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    /// Release translations still marked unfinished
    #[serde(default = "default_true")]
    pub include_unfinished: bool,

    /// Drop translations identical to their source
    #[serde(default)]
    pub remove_identical: bool,

    /// Prefix for the source text of untranslated messages
    #[serde(default)]
    pub mark_untranslated: Option<String>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            include_unfinished: true,
            remove_identical: false,
            mark_untranslated: None,
        }
    }
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_catalog_dir() -> PathBuf {
    PathBuf::from("languages")
}

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "conf.json";

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        language_utils::get_language_name(&self.source_language)
            .context("Invalid source_language")?;
        language_utils::get_language_name(&self.default_language)
            .context("Invalid default_language")?;

        if self.catalogs.prefix.contains(['/', '\\']) {
            return Err(anyhow!(
                "Catalog prefix must be a file name prefix, not a path: {}",
                self.catalogs.prefix
            ));
        }

        if self.release.mark_untranslated.as_deref() == Some("") {
            return Err(anyhow!("mark_untranslated must not be an empty string"));
        }

        Ok(())
    }

    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Pick the configuration file to use
    ///
    /// An explicit path wins. Otherwise `conf.json` in the working directory,
    /// then `<config dir>/tscat/conf.json`; when neither exists the working
    /// directory one is returned so a default can be created there.
    pub fn locate(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return local;
        }

        if let Some(user) = dirs::config_dir().map(|d| d.join("tscat").join(CONFIG_FILE_NAME)) {
            if user.exists() {
                return user;
            }
        }

        local
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "en".to_string(),
            default_language: "en".to_string(),
            catalogs: CatalogConfig::default(),
            release: ReleaseConfig::default(),
            validation: ValidationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
