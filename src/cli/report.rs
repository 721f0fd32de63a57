//! Report formatting and printing utilities.
//!
//! Everything goes to a caller-supplied writer (stdout in the binary) so the
//! output can be captured in tests. Colors follow `NO_COLOR`.

use std::io::Write;

use colored::Colorize;

use super::run::{LanguageSummary, RunSummary};
use crate::core::LanguagePack;
use crate::issues::{Issue, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print_baseline_to<W: Write>(writer: &mut W, display_path: &str, pack: &LanguagePack) {
    let _ = writeln!(
        writer,
        "{} {} ({}): {} {}",
        "Baseline".bold(),
        pack.lang().bold(),
        display_path,
        pack.len(),
        if pack.len() == 1 { "key" } else { "keys" }
    );
}

pub fn print_target_to<W: Write>(writer: &mut W, display_path: &str, pack: &LanguagePack) {
    let state = if !pack.exists() {
        " (new file)".to_string()
    } else {
        String::new()
    };
    let _ = writeln!(
        writer,
        "\n{} {} ({}){}: {} {}",
        "Target".bold(),
        pack.lang().bold(),
        display_path,
        state,
        pack.len(),
        if pack.len() == 1 { "key" } else { "keys" }
    );
}

/// One line per missing key, printed before anything is translated.
pub fn print_missing_to<W: Write>(writer: &mut W, missing: &[String]) {
    for key in missing {
        let _ = writeln!(writer, "{} {}", "missing:".cyan(), key);
    }
}

pub fn print_issues_to<W: Write>(writer: &mut W, issues: &[Issue]) {
    for issue in issues {
        let severity = match issue.severity() {
            Severity::Error => "error".bold().red(),
            Severity::Warning => "warning".bold().yellow(),
        };
        let _ = writeln!(
            writer,
            "{}: {} {}",
            severity,
            issue.message(),
            format!("[{}]", issue.rule()).dimmed()
        );
    }
}

pub fn print_language_result_to<W: Write>(writer: &mut W, summary: &LanguageSummary) {
    let lang = summary.lang.as_str();

    if summary.missing == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("{}: no missing keys", lang).green()
        );
        return;
    }

    if summary.dry_run {
        let _ = writeln!(
            writer,
            "{} {}: {} missing {} (dry run, nothing written)",
            "-".cyan(),
            lang,
            summary.missing,
            plural_key(summary.missing)
        );
        return;
    }

    if summary.added > 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "{}: added {} {} ({} from cache)",
                lang,
                summary.added,
                if summary.added == 1 {
                    "translation"
                } else {
                    "translations"
                },
                summary.from_cache
            )
            .green()
        );
    }

    if summary.failed > 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "{}: {} {} could not be translated",
                lang,
                summary.failed,
                plural_key(summary.failed)
            )
            .red()
        );
    }
}

pub fn print_summary_to<W: Write>(writer: &mut W, summary: &RunSummary) {
    if summary.error_count + summary.warning_count == 0 {
        return;
    }
    let _ = writeln!(
        writer,
        "\n{} {} ({} {}, {} {})",
        if summary.error_count > 0 {
            FAILURE_MARK.red()
        } else {
            "!".yellow()
        },
        "problems".bold(),
        summary.error_count,
        if summary.error_count == 1 {
            "error"
        } else {
            "errors"
        }
        .red(),
        summary.warning_count,
        if summary.warning_count == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn plural_key(count: usize) -> &'static str {
    if count == 1 { "key" } else { "keys" }
}
