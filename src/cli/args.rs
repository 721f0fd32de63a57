//! CLI argument definitions using clap.
//!
//! Every option that also exists in `.langgaprc.json` overrides the config
//! file value.

use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use crate::core::Quote;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Target language codes to fill in (e.g. `en fr`)
    pub langs: Vec<String>,

    /// Baseline language code (overrides config file, default: en)
    #[arg(long, value_name = "LANG")]
    pub from: Option<String>,

    /// Target language code (replaces positional targets)
    #[arg(long, value_name = "LANG")]
    pub to: Option<String>,

    /// Fill every language file found next to the baseline
    #[arg(long, conflicts_with = "to")]
    pub all: bool,

    /// Language file extension (default: .php)
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Name of the globals variable holding the translations (default: $GLOBALS)
    #[arg(long, value_name = "NAME")]
    pub dictionary: Option<String>,

    /// Key of the translations array inside the globals variable (default: translations)
    #[arg(long, value_name = "KEY")]
    pub languages_key: Option<String>,

    /// Directory containing the language files
    #[arg(long, value_name = "DIR")]
    pub lang_dir: Option<PathBuf>,

    /// Translation cache file (default: trCache.json)
    #[arg(long, value_name = "FILE")]
    pub cache: Option<PathBuf>,

    /// Quote style for newly added lines (default: single)
    #[arg(long, value_enum)]
    pub quote: Option<Quote>,

    /// Base URL of the translation service
    #[arg(long, env = "LANGGAP_ENDPOINT", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Only report missing keys, do not translate or write anything
    #[arg(long)]
    pub dry_run: bool,

    /// Write a default .langgaprc.json and exit
    #[arg(long, exclusive = true)]
    pub init: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Arguments {
    /// Check if there is anything to do, otherwise print help and return None.
    pub fn with_targets_or_help(self) -> Option<Self> {
        if self.init || self.all || self.to.is_some() || !self.langs.is_empty() {
            Some(self)
        } else {
            Self::command().print_help().ok();
            None
        }
    }

    /// Explicitly requested targets: `--to` wins over positional languages.
    pub fn requested_targets(&self) -> Vec<String> {
        match &self.to {
            Some(to) => vec![to.clone()],
            None => self.langs.clone(),
        }
    }
}
