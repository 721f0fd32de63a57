//! Rebuilding a target file's lines with new translations.

use std::{fs, path::Path};

use super::fill::TranslatedEntry;
use super::pack::LanguagePack;
use super::pattern::{Assignment, LinePattern, LineShape, Quote};
use crate::error::{Error, Result};

/// Quote style for lines written by the tool.
///
/// Existing lines always keep their own quotes; only new entries use this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuotePolicy {
    default: Quote,
}

impl QuotePolicy {
    pub fn new(default: Quote) -> Self {
        Self { default }
    }

    /// Quote wrapping the value of a newly added key.
    pub fn new_entry_quote(&self) -> Quote {
        self.default
    }
}

/// Lines of `target` with every entry of `translated` added.
///
/// Existing lines come through verbatim. New lines follow baseline order and
/// go before a closing `?>` when the file has one. Each new line copies the
/// indent and suffix of its baseline line and is preceded by the comment and
/// blank lines found above that key in the baseline. A target without any
/// lines starts with the baseline's preamble (e.g. `<?php`).
pub fn merge(
    target: &LanguagePack,
    baseline: &LanguagePack,
    translated: &[TranslatedEntry],
    pattern: &LinePattern,
    policy: QuotePolicy,
) -> Vec<String> {
    let mut lines: Vec<String> = if target.lines().is_empty() && !translated.is_empty() {
        baseline.preamble().to_vec()
    } else {
        target.lines().to_vec()
    };

    let first_key = baseline.keys().next();
    let mut new_lines = Vec::new();
    for entry in translated {
        // The first key's leading lines are the preamble.
        if first_key != Some(entry.key.as_str()) {
            new_lines.extend_from_slice(baseline.leading_lines(&entry.key));
        }
        new_lines.push(render_new_entry(
            pattern,
            target.lang(),
            &entry.key,
            baseline.get(&entry.key),
            &entry.value,
            policy,
        ));
    }

    let at = closing_tag_index(&lines).unwrap_or(lines.len());
    let tail = lines.split_off(at);
    lines.extend(new_lines);
    lines.extend(tail);
    lines
}

/// Render a line for a key the target did not have.
///
/// Quotes come from `policy`. With a baseline `template` its indent and suffix
/// are kept, and its key quote is used when the key text itself contains the
/// policy's quote, since keys are copied verbatim and never re-escaped.
pub fn render_new_entry(
    pattern: &LinePattern,
    lang: &str,
    key: &str,
    template: Option<&Assignment>,
    value: &str,
    policy: QuotePolicy,
) -> String {
    let quote = policy.new_entry_quote();
    let mut shape = LineShape::canonical(quote);
    if let Some(template) = template {
        shape.indent = template.shape.indent.clone();
        shape.suffix = template.shape.suffix.clone();
        if key.contains(quote.as_char()) {
            shape.key_quote = template.shape.key_quote;
        }
    }
    pattern.render(&Assignment {
        lang: lang.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        quote,
        shape,
    })
}

/// Index of a trailing `?>` line, ignoring blank lines after it.
fn closing_tag_index(lines: &[String]) -> Option<usize> {
    let (index, line) = lines
        .iter()
        .enumerate()
        .rev()
        .find(|(_, line)| !line.trim().is_empty())?;
    (line.trim() == "?>").then_some(index)
}

/// Write `lines` to `path`, one per line with a trailing newline.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(path, content).map_err(|err| Error::write(path, err))
}
