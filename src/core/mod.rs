//! Core engine: parse language files, find missing keys, translate, merge.
//!
//! A run over one target language goes through these steps in order:
//!
//! 1. [`LanguagePack::load`] the baseline and [`LanguagePack::load_or_empty`] the target
//! 2. [`diff`] them to get the missing keys
//! 3. [`fill_missing`] through the cache and the translator
//! 4. [`merge`] the translations into the target's lines and [`write_lines`]

pub mod diff;
pub mod fill;
pub mod markup;
pub mod merge;
pub mod pack;
pub mod pattern;

pub use diff::{diff, untranslated};
pub use fill::{FailedKey, FillOutcome, TranslatedEntry, TranslationRequest, fill_missing};
pub use merge::{QuotePolicy, merge, write_lines};
pub use pack::{DuplicateKey, LanguagePack};
pub use pattern::{Assignment, LinePattern, LineShape, Quote};
