//! Main entry point for a langgap run.
//!
//! Reads the baseline once, then processes each target language fully
//! (read, diff, translate, merge, write, save cache) before the next.

use std::{error::Error as _, fs, io::Write, path::Path};

use anyhow::{Context, Result, bail};
use tracing::warn;

use super::{
    args::Arguments,
    context::RunContext,
    exit_status::ExitStatus,
    report::{
        SUCCESS_MARK, print_baseline_to, print_issues_to, print_language_result_to,
        print_missing_to, print_summary_to, print_target_to,
    },
};
use crate::{
    cache::CacheStore,
    config::{CONFIG_FILE_NAME, default_config_json},
    core::{LanguagePack, diff, fill_missing, merge, untranslated, write_lines},
    issues::{
        CorruptCacheIssue, DuplicateKeyIssue, EmptyBaselineIssue, Issue, LanguageFailedIssue,
        Severity, TranslationFailedIssue, UntranslatedIssue,
    },
    translator::{GoogleTranslator, Translator},
};

/// Outcome for one target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSummary {
    pub lang: String,
    pub missing: usize,
    pub added: usize,
    pub from_cache: usize,
    pub failed: usize,
    pub written: bool,
    pub dry_run: bool,
}

/// Result of a whole run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub baseline_keys: usize,
    pub languages: Vec<LanguageSummary>,
    pub error_count: usize,
    pub warning_count: usize,
    /// Targets whose processing stopped on a file-level error.
    pub failed_languages: Vec<String>,
}

impl RunSummary {
    fn record(&mut self, issues: &[Issue]) {
        for issue in issues {
            match issue.severity() {
                Severity::Error => self.error_count += 1,
                Severity::Warning => self.warning_count += 1,
            }
        }
    }

    /// Error when a target language was skipped, Failure when some keys could
    /// not be translated, Success otherwise.
    pub fn exit_status(&self) -> ExitStatus {
        if !self.failed_languages.is_empty() {
            ExitStatus::Error
        } else if self.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

/// Translator and cache used to fill missing keys. Absent in dry-run mode.
struct Engine<'a> {
    translator: &'a dyn Translator,
    cache: &'a mut CacheStore,
}

pub fn run<W: Write>(args: &Arguments, writer: &mut W) -> Result<RunSummary> {
    if args.init {
        init()?;
        let _ = writeln!(writer, "{} Created {}", SUCCESS_MARK, CONFIG_FILE_NAME);
        return Ok(RunSummary::default());
    }

    let ctx = RunContext::new(args)?;
    if ctx.dry_run {
        return run_with(&ctx, args, None, writer);
    }

    let translator = GoogleTranslator::new(&ctx.config.endpoint, ctx.timeout())
        .context("Failed to create the translation client")?;
    run_with(&ctx, args, Some(&translator), writer)
}

/// Run against an already resolved context and translator.
///
/// `translator` is only used when `ctx.dry_run` is false.
pub fn run_with<W: Write>(
    ctx: &RunContext,
    args: &Arguments,
    translator: Option<&dyn Translator>,
    writer: &mut W,
) -> Result<RunSummary> {
    let targets = ctx.targets(args)?;

    let from = ctx.baseline_lang();
    let baseline_path = ctx.language_path(from);
    let baseline = LanguagePack::load(&baseline_path, from, &ctx.pattern)
        .with_context(|| format!("Failed to load the baseline language '{}'", from))?;

    let mut summary = RunSummary {
        baseline_keys: baseline.len(),
        ..Default::default()
    };

    let baseline_display = ctx.display_path(&baseline_path);
    print_baseline_to(writer, &baseline_display, &baseline);

    let mut issues = Vec::new();
    if baseline.is_empty() {
        issues.push(Issue::EmptyBaseline(EmptyBaselineIssue {
            file_path: baseline_display.clone(),
            prefix: ctx.pattern.prefix(),
        }));
    }
    issues.extend(
        baseline
            .duplicates()
            .iter()
            .map(|d| Issue::DuplicateKey(DuplicateKeyIssue::new(&baseline_display, d))),
    );

    let mut cache = None;
    if !ctx.dry_run {
        let loaded = CacheStore::load(&ctx.cache_path)?;
        if let Some(err) = loaded.corrupt {
            issues.push(Issue::CorruptCache(CorruptCacheIssue {
                file_path: ctx.display_path(loaded.store.path()),
                error: err
                    .source()
                    .map_or_else(|| err.to_string(), ToString::to_string),
            }));
        }
        cache = Some(loaded.store);
    }

    print_issues_to(writer, &issues);
    summary.record(&issues);

    for lang in &targets {
        let engine = match (translator, cache.as_mut()) {
            (Some(translator), Some(cache)) => Some(Engine { translator, cache }),
            _ => None,
        };
        if engine.is_none() && !ctx.dry_run {
            bail!("No translator available for '{}'", lang);
        }
        match process_language(ctx, &baseline, lang, engine, &mut summary, writer) {
            Ok(language) => summary.languages.push(language),
            Err(err) => {
                warn!("{}: {:#}", lang, err);
                let failed = [Issue::LanguageFailed(LanguageFailedIssue {
                    lang: lang.clone(),
                    error: format!("{:#}", err),
                })];
                print_issues_to(writer, &failed);
                summary.record(&failed);
                summary.failed_languages.push(lang.clone());
            }
        }
    }

    print_summary_to(writer, &summary);
    Ok(summary)
}

fn process_language<W: Write>(
    ctx: &RunContext,
    baseline: &LanguagePack,
    lang: &str,
    engine: Option<Engine<'_>>,
    summary: &mut RunSummary,
    writer: &mut W,
) -> Result<LanguageSummary> {
    let path = ctx.language_path(lang);
    let display = ctx.display_path(&path);
    let target = LanguagePack::load_or_empty(&path, lang, &ctx.pattern)
        .with_context(|| format!("Failed to load language '{}'", lang))?;
    print_target_to(writer, &display, &target);

    let missing = diff(baseline, &target);
    print_missing_to(writer, &missing);

    let mut issues: Vec<Issue> = target
        .duplicates()
        .iter()
        .map(|d| Issue::DuplicateKey(DuplicateKeyIssue::new(&display, d)))
        .collect();
    issues.extend(untranslated(baseline, &target).into_iter().map(|key| {
        Issue::Untranslated(UntranslatedIssue {
            file_path: display.clone(),
            key,
            baseline_lang: baseline.lang().to_string(),
        })
    }));

    let mut result = LanguageSummary {
        lang: lang.to_string(),
        missing: missing.len(),
        added: 0,
        from_cache: 0,
        failed: 0,
        written: false,
        dry_run: engine.is_none(),
    };

    if let Some(engine) = engine.filter(|_| !missing.is_empty()) {
        let outcome = fill_missing(&missing, baseline, lang, engine.translator, engine.cache);

        issues.extend(
            outcome
                .failed
                .iter()
                .map(|f| Issue::TranslationFailed(TranslationFailedIssue::new(lang, f))),
        );

        if !outcome.translated.is_empty() {
            let lines = merge(
                &target,
                baseline,
                &outcome.translated,
                &ctx.pattern,
                ctx.policy,
            );
            write_lines(target.path(), &lines)
                .with_context(|| format!("Failed to update language '{}'", lang))?;
            result.written = true;
        }

        engine
            .cache
            .save()
            .context("Failed to save the translation cache")?;

        result.added = outcome.translated.len();
        result.from_cache = outcome.cached_count();
        result.failed = outcome.failed.len();
    }

    print_issues_to(writer, &issues);
    summary.record(&issues);
    print_language_result_to(writer, &result);
    Ok(result)
}

fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    Ok(())
}
