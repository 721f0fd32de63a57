//! Common utility functions shared across the codebase.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Checks if the text contains at least one Unicode alphabetic character.
///
/// Returns false for empty strings, pure numbers, or pure symbols.
///
/// # Examples
///
/// ```
/// use langgap::utils::contains_alphabetic;
///
/// assert!(contains_alphabetic("Hola"));
/// assert!(contains_alphabetic("你好"));
/// assert!(!contains_alphabetic("%d"));
/// assert!(!contains_alphabetic(""));
/// ```
pub fn contains_alphabetic(text: &str) -> bool {
    text.chars().any(|c| c.is_alphabetic())
}

/// Ensure a file extension starts with a dot (`php` -> `.php`).
pub fn normalize_extension(extension: &str) -> String {
    let extension = extension.trim();
    if extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{}", extension)
    }
}

/// Path of the file holding `lang`, e.g. `lang/en.php`.
pub fn language_file(dir: &Path, lang: &str, extension: &str) -> PathBuf {
    dir.join(format!("{}{}", lang, extension))
}

/// Language codes that have a file with `extension` directly inside `dir`, sorted.
pub fn list_languages(dir: &Path, extension: &str) -> Result<Vec<String>> {
    let extension = extension.to_lowercase();
    let mut langs = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if name.starts_with('.') || !name.to_lowercase().ends_with(&extension) {
            continue;
        }
        let lang = &name[..name.len() - extension.len()];
        if !lang.is_empty() {
            langs.push(lang.to_string());
        }
    }

    langs.sort();
    Ok(langs)
}

#[cfg(test)]
mod tests {
    use crate::utils::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_contains_alphabetic() {
        assert!(contains_alphabetic("Hello"));
        assert!(contains_alphabetic("Adiós"));
        assert!(contains_alphabetic("Hello %s"));

        assert!(!contains_alphabetic("123"));
        assert!(!contains_alphabetic("%s: %d"));
        assert!(!contains_alphabetic("   "));
        assert!(!contains_alphabetic(""));
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("php"), ".php");
        assert_eq!(normalize_extension(".php"), ".php");
        assert_eq!(normalize_extension(" .inc "), ".inc");
    }

    #[test]
    fn test_language_file() {
        assert_eq!(
            language_file(Path::new("lang"), "en", ".php"),
            Path::new("lang").join("en.php")
        );
    }

    #[test]
    fn test_list_languages() {
        let dir = tempdir().unwrap();
        for name in ["es.php", "en.php", "fr.PHP", "notes.txt", ".hidden.php"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("de.php")).unwrap();

        let langs = list_languages(dir.path(), ".php").unwrap();
        assert_eq!(langs, vec!["en", "es", "fr"]);
    }
}
