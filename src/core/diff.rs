//! Key comparison between a baseline pack and a target pack.

use super::pack::LanguagePack;
use crate::utils::contains_alphabetic;

/// Keys in `baseline` that `target` does not define, in baseline order.
pub fn diff(baseline: &LanguagePack, target: &LanguagePack) -> Vec<String> {
    baseline
        .keys()
        .filter(|key| !target.contains_key(key))
        .map(str::to_string)
        .collect()
}

/// Keys whose target value is identical to the baseline value.
///
/// Values without any alphabetic character (numbers, symbols, placeholders
/// like `%s`) are skipped since they usually need no translation.
pub fn untranslated(baseline: &LanguagePack, target: &LanguagePack) -> Vec<String> {
    baseline
        .keys()
        .filter_map(|key| {
            let source = baseline.get(key)?;
            let translated = target.get(key)?;
            (translated.value == source.value && contains_alphabetic(&source.value))
                .then(|| key.to_string())
        })
        .collect()
}
