//! Translating missing keys, cache first.

use tracing::{debug, warn};

use super::markup::{Chunk, split_markup};
use super::pack::LanguagePack;
use super::pattern::Quote;
use crate::cache::{CacheEntry, CacheStore};
use crate::translator::{TranslateError, Translator};

/// A single value to translate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub key: String,
    /// Baseline value, already unescaped for `source_quote`.
    pub source_value: String,
    pub source_quote: Quote,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedEntry {
    pub key: String,
    pub value: String,
    pub from_cache: bool,
}

#[derive(Debug)]
pub struct FailedKey {
    pub key: String,
    pub error: TranslateError,
}

/// What happened to each missing key, in baseline order.
#[derive(Debug, Default)]
pub struct FillOutcome {
    pub translated: Vec<TranslatedEntry>,
    pub failed: Vec<FailedKey>,
}

impl FillOutcome {
    pub fn cached_count(&self) -> usize {
        self.translated.iter().filter(|e| e.from_cache).count()
    }
}

/// Produce a translation for every key in `missing`.
///
/// Cached translations for `(from, to, key)` are used as is. Otherwise the
/// baseline value goes through `translator` and the result is cached before
/// use. A failing key is recorded in [`FillOutcome::failed`] and the rest
/// continue.
pub fn fill_missing(
    missing: &[String],
    baseline: &LanguagePack,
    to: &str,
    translator: &dyn Translator,
    cache: &mut CacheStore,
) -> FillOutcome {
    let from = baseline.lang();
    let mut outcome = FillOutcome::default();

    for key in missing {
        let Some(source) = baseline.get(key) else {
            continue;
        };

        if let Some(cached) = cache.get(from, to, key) {
            debug!("cache hit for '{}' ({} -> {})", key, from, to);
            outcome.translated.push(TranslatedEntry {
                key: key.clone(),
                value: cached.to_string(),
                from_cache: true,
            });
            continue;
        }

        let request = TranslationRequest {
            key: key.clone(),
            source_value: source.value.clone(),
            source_quote: source.quote,
            from: from.to_string(),
            to: to.to_string(),
        };

        match translate_request(&request, translator) {
            Ok(value) => {
                cache.insert(CacheEntry {
                    from: request.from,
                    to: request.to,
                    key: request.key,
                    value: value.clone(),
                });
                outcome.translated.push(TranslatedEntry {
                    key: key.clone(),
                    value,
                    from_cache: false,
                });
            }
            Err(error) => {
                warn!("could not translate '{}': {}", key, error);
                outcome.failed.push(FailedKey {
                    key: key.clone(),
                    error,
                });
            }
        }
    }

    outcome
}

/// Translate the text parts of a value, leaving markup and whitespace alone.
pub fn translate_request(
    request: &TranslationRequest,
    translator: &dyn Translator,
) -> Result<String, TranslateError> {
    let value = request.source_value.as_str();
    let chunks = match split_markup(value) {
        Ok(chunks) => chunks,
        Err(err) => {
            warn!(
                "'{}': {}; translating the whole value as text",
                request.key, err
            );
            vec![Chunk::Text(value)]
        }
    };

    let mut translated = String::with_capacity(value.len());
    for chunk in chunks {
        match chunk {
            Chunk::Markup(markup) => translated.push_str(markup),
            Chunk::Text(text) if text.trim().is_empty() => translated.push_str(text),
            Chunk::Text(text) => {
                translated.push_str(&translate_text(text, request, translator)?);
            }
        }
    }
    Ok(translated)
}

/// Send one text chunk, keeping its surrounding whitespace.
///
/// Escapes of the other quote style are resolved so the translator sees plain
/// text. The result is returned unescaped; only the writer escapes.
fn translate_text(
    text: &str,
    request: &TranslationRequest,
    translator: &dyn Translator,
) -> Result<String, TranslateError> {
    let plain = request.source_quote.other().unescape(text);

    let core = plain.trim();
    let leading = &plain[..plain.len() - plain.trim_start().len()];
    let trailing = &plain[plain.trim_end().len()..];

    let result = translator.translate(core, &request.from, &request.to)?;
    Ok(format!("{leading}{result}{trailing}"))
}
