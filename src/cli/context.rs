use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context as _, Result, bail};
use tracing::debug;

use super::args::Arguments;
use crate::{
    config::{Config, load_config},
    core::{LinePattern, QuotePolicy},
    utils::{language_file, list_languages, normalize_extension},
};

/// Settings for one run, merged from CLI arguments, the config file and defaults.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g. `--from es`)
/// 2. `.langgaprc.json` config file
/// 3. Built-in defaults
pub struct RunContext {
    /// Working directory; relative paths are resolved against it.
    pub root: PathBuf,
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,
    /// Directory holding the language files.
    pub lang_dir: PathBuf,
    pub cache_path: PathBuf,
    pub pattern: LinePattern,
    pub policy: QuotePolicy,
    pub dry_run: bool,
}

impl RunContext {
    pub fn new(args: &Arguments) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to determine the current directory")?;
        Self::with_root(args, &cwd)
    }

    /// Like [`RunContext::new`] with an explicit working directory.
    pub fn with_root(args: &Arguments, root: &Path) -> Result<Self> {
        let config_result = load_config(root)?;
        if !config_result.from_file {
            debug!("no .langgaprc.json found, using default configuration");
        }

        let mut config = config_result.config;

        if let Some(ref from) = args.from {
            config.from = from.clone();
        }
        if let Some(ref extension) = args.extension {
            config.extension = extension.clone();
        }
        if let Some(ref dictionary) = args.dictionary {
            config.dictionary = dictionary.clone();
        }
        if let Some(ref languages_key) = args.languages_key {
            config.languages_key = languages_key.clone();
        }
        if let Some(ref cache) = args.cache {
            config.cache_file = cache.to_string_lossy().to_string();
        }
        if let Some(quote) = args.quote {
            config.default_quote = quote;
        }
        if let Some(ref endpoint) = args.endpoint {
            config.endpoint = endpoint.clone();
        }
        config.extension = normalize_extension(&config.extension);
        config.validate()?;

        let lang_dir = resolve_lang_dir(args.lang_dir.as_deref(), &config, root);
        debug!("language directory: {}", lang_dir.display());

        let pattern = LinePattern::new(&config.dictionary, &config.languages_key)
            .context("Failed to build the assignment pattern")?;

        Ok(Self {
            root: root.to_path_buf(),
            lang_dir,
            cache_path: root.join(&config.cache_file),
            pattern,
            policy: QuotePolicy::new(config.default_quote),
            dry_run: args.dry_run,
            config,
        })
    }

    pub fn baseline_lang(&self) -> &str {
        &self.config.from
    }

    pub fn language_path(&self, lang: &str) -> PathBuf {
        language_file(&self.lang_dir, lang, &self.config.extension)
    }

    /// `path` relative to the working directory when it is inside it.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    /// Target languages to process, in order, without duplicates.
    pub fn targets(&self, args: &Arguments) -> Result<Vec<String>> {
        let requested = if args.all {
            list_languages(&self.lang_dir, &self.config.extension)?
                .into_iter()
                .filter(|lang| lang != self.baseline_lang() && !self.config.ignores.contains(lang))
                .collect()
        } else {
            args.requested_targets()
        };

        let mut targets: Vec<String> = Vec::new();
        for lang in requested {
            let lang = lang.trim().to_string();
            if lang == self.baseline_lang() {
                let existing = list_languages(&self.lang_dir, &self.config.extension)
                    .unwrap_or_default()
                    .into_iter()
                    .filter(|l| l != self.baseline_lang())
                    .collect::<Vec<_>>();
                bail!(
                    "'{}' is the baseline language; specify a target such as one of [{}] in {}",
                    lang,
                    existing.join(", "),
                    self.lang_dir.display()
                );
            }
            if !lang.is_empty() && !targets.contains(&lang) {
                targets.push(lang);
            }
        }
        Ok(targets)
    }
}

/// Pick the language directory.
///
/// Priority: `--lang-dir`, config `langDir`, the root itself when the baseline
/// file is there, `./lang` when it exists, and finally the root.
fn resolve_lang_dir(explicit: Option<&Path>, config: &Config, root: &Path) -> PathBuf {
    if let Some(dir) = explicit {
        return root.join(dir);
    }
    if let Some(ref dir) = config.lang_dir {
        return root.join(dir);
    }
    if language_file(root, &config.from, &config.extension).is_file() {
        return root.to_path_buf();
    }
    let lang = root.join("lang");
    if lang.is_dir() {
        return lang;
    }
    root.to_path_buf()
}
