//! Issue types reported during a run.
//!
//! Missing keys are not issues: they are the work the run performs. Issues are
//! things a human may need to look at afterwards.

use std::fmt;

use crate::core::{DuplicateKey, FailedKey};

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    EmptyBaseline,
    CorruptCache,
    DuplicateKey,
    Untranslated,
    TranslationFailed,
    LanguageFailed,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::EmptyBaseline => write!(f, "empty-baseline"),
            Rule::CorruptCache => write!(f, "corrupt-cache"),
            Rule::DuplicateKey => write!(f, "duplicate-key"),
            Rule::Untranslated => write!(f, "untranslated"),
            Rule::TranslationFailed => write!(f, "translation-failed"),
            Rule::LanguageFailed => write!(f, "language-failed"),
        }
    }
}

/// The baseline file has no assignments, usually a wrong `--dictionary` or `--languages-key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyBaselineIssue {
    pub file_path: String,
    /// The assignment prefix that was looked for, e.g. `$GLOBALS['translations']`.
    pub prefix: String,
}

/// `trCache.json` could not be parsed and was ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorruptCacheIssue {
    pub file_path: String,
    pub error: String,
}

/// A key assigned more than once in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKeyIssue {
    pub file_path: String,
    pub key: String,
    pub first_line: usize,
    pub line: usize,
}

impl DuplicateKeyIssue {
    pub fn new(file_path: &str, duplicate: &DuplicateKey) -> Self {
        Self {
            file_path: file_path.to_string(),
            key: duplicate.key.clone(),
            first_line: duplicate.first_line,
            line: duplicate.line,
        }
    }
}

/// A target value identical to the baseline value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntranslatedIssue {
    pub file_path: String,
    pub key: String,
    pub baseline_lang: String,
}

/// The translator failed for a key; the key was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationFailedIssue {
    pub lang: String,
    pub key: String,
    pub error: String,
}

impl TranslationFailedIssue {
    pub fn new(lang: &str, failed: &FailedKey) -> Self {
        Self {
            lang: lang.to_string(),
            key: failed.key.clone(),
            error: failed.error.to_string(),
        }
    }
}

/// A target language could not be read or written; its processing stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageFailedIssue {
    pub lang: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    EmptyBaseline(EmptyBaselineIssue),
    CorruptCache(CorruptCacheIssue),
    DuplicateKey(DuplicateKeyIssue),
    Untranslated(UntranslatedIssue),
    TranslationFailed(TranslationFailedIssue),
    LanguageFailed(LanguageFailedIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::TranslationFailed(_) | Issue::LanguageFailed(_) => Severity::Error,
            _ => Severity::Warning,
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::EmptyBaseline(_) => Rule::EmptyBaseline,
            Issue::CorruptCache(_) => Rule::CorruptCache,
            Issue::DuplicateKey(_) => Rule::DuplicateKey,
            Issue::Untranslated(_) => Rule::Untranslated,
            Issue::TranslationFailed(_) => Rule::TranslationFailed,
            Issue::LanguageFailed(_) => Rule::LanguageFailed,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Issue::EmptyBaseline(i) => format!(
                "baseline {} has no {} assignments; check --dictionary and --languages-key",
                i.file_path, i.prefix
            ),
            Issue::CorruptCache(i) => format!(
                "translation cache {} is unreadable and was ignored: {}",
                i.file_path, i.error
            ),
            Issue::DuplicateKey(i) => format!(
                "{}:{}: key '{}' was already assigned on line {}, the last value wins",
                i.file_path, i.line, i.key, i.first_line
            ),
            Issue::Untranslated(i) => format!(
                "{}: '{}' has the same value as in {}",
                i.file_path, i.key, i.baseline_lang
            ),
            Issue::TranslationFailed(i) => {
                format!("could not translate '{}' to {}: {}", i.key, i.lang, i.error)
            }
            Issue::LanguageFailed(i) => format!("{} was skipped: {}", i.lang, i.error),
        }
    }
}
