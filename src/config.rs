use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

use crate::cache::CACHE_FILE_NAME;
use crate::core::Quote;
use crate::translator::GoogleTranslator;

pub const CONFIG_FILE_NAME: &str = ".langgaprc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Baseline language code.
    #[serde(default = "default_from")]
    pub from: String,
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Name of the globals variable, e.g. `$GLOBALS`.
    #[serde(default = "default_dictionary", alias = "globalsName")]
    pub dictionary: String,
    #[serde(default = "default_languages_key", alias = "translationsKey")]
    pub languages_key: String,
    /// Directory holding the language files. Detected when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang_dir: Option<String>,
    #[serde(default = "default_cache_file")]
    pub cache_file: String,
    /// Quote used for newly added lines.
    #[serde(default)]
    pub default_quote: Quote,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Language files skipped by `--all`, by language code.
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
}

fn default_from() -> String {
    "en".to_string()
}

fn default_extension() -> String {
    ".php".to_string()
}

fn default_dictionary() -> String {
    "$GLOBALS".to_string()
}

fn default_languages_key() -> String {
    "translations".to_string()
}

fn default_cache_file() -> String {
    CACHE_FILE_NAME.to_string()
}

fn default_endpoint() -> String {
    GoogleTranslator::DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_ignores() -> Vec<String> {
    vec!["translations".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            from: default_from(),
            extension: default_extension(),
            dictionary: default_dictionary(),
            languages_key: default_languages_key(),
            lang_dir: None,
            cache_file: default_cache_file(),
            default_quote: Quote::default(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            ignores: default_ignores(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("from", &self.from),
            ("extension", &self.extension),
            ("dictionary", &self.dictionary),
            ("languagesKey", &self.languages_key),
            ("cacheFile", &self.cache_file),
        ] {
            if value.trim().is_empty() {
                bail!("'{}' must not be empty", name);
            }
        }

        if self.timeout_secs == 0 {
            bail!("'timeoutSecs' must be greater than 0");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config
                .validate()
                .with_context(|| format!("Invalid config file: {:?}", path))?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
