//! In-memory representation of one language file.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use super::pattern::{Assignment, LinePattern};
use crate::error::{Error, Result};

/// A key assigned more than once in the same file. The later value wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey {
    pub key: String,
    /// 1-based line of the first assignment.
    pub first_line: usize,
    /// 1-based line of the overriding assignment.
    pub line: usize,
}

/// Ordered key/value assignments of one language, plus the raw lines they came from.
#[derive(Debug, Clone)]
pub struct LanguagePack {
    lang: String,
    path: PathBuf,
    entries: HashMap<String, Assignment>,
    /// Keys in first-seen order.
    order: Vec<String>,
    lines: Vec<String>,
    /// Non-assignment lines (comments, blanks) directly above each key.
    leading: HashMap<String, Vec<String>>,
    duplicates: Vec<DuplicateKey>,
    /// False when the file did not exist on load.
    exists: bool,
}

impl LanguagePack {
    /// Read a language file that must exist (the baseline).
    pub fn load(path: &Path, lang: &str, pattern: &LinePattern) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| Error::read(path, err))?;
        Ok(Self::parse(path, lang, &content, pattern))
    }

    /// Read a target language file. A missing file is an empty pack.
    pub fn load_or_empty(path: &Path, lang: &str, pattern: &LinePattern) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse(path, lang, &content, pattern)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("{} does not exist yet, starting from an empty pack", path.display());
                Ok(Self::empty(path, lang))
            }
            Err(err) => Err(Error::read(path, err)),
        }
    }

    pub fn empty(path: &Path, lang: &str) -> Self {
        Self {
            lang: lang.to_string(),
            path: path.to_path_buf(),
            entries: HashMap::new(),
            order: Vec::new(),
            lines: Vec::new(),
            leading: HashMap::new(),
            duplicates: Vec::new(),
            exists: false,
        }
    }

    pub fn parse(path: &Path, lang: &str, content: &str, pattern: &LinePattern) -> Self {
        let mut pack = Self::empty(path, lang);
        pack.exists = true;
        let mut first_seen: HashMap<String, usize> = HashMap::new();
        let mut pending: Vec<String> = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;
            pack.lines.push(line.to_string());

            let Some(assignment) = pattern.match_line(line) else {
                if line.trim_start().starts_with(pattern.globals_name()) {
                    debug!(
                        "{}:{}: not a {} assignment, kept as is",
                        path.display(),
                        line_no,
                        pattern.prefix()
                    );
                }
                pending.push(line.to_string());
                continue;
            };

            if assignment.lang != lang {
                warn!(
                    "{}:{}: expected language '{}' but the line assigns '{}', kept as is",
                    path.display(),
                    line_no,
                    lang,
                    assignment.lang
                );
                continue;
            }

            let key = assignment.key.clone();
            match first_seen.get(&key) {
                Some(&first_line) => {
                    warn!(
                        "{}:{}: key '{}' was already assigned on line {}, the later value wins",
                        path.display(),
                        line_no,
                        key,
                        first_line
                    );
                    pack.duplicates.push(DuplicateKey {
                        key: key.clone(),
                        first_line,
                        line: line_no,
                    });
                }
                None => {
                    first_seen.insert(key.clone(), line_no);
                    pack.order.push(key.clone());
                    pack.leading.insert(key.clone(), std::mem::take(&mut pending));
                }
            }
            pack.entries.insert(key, assignment);
        }

        debug!(
            "{}: {} line(s), {} key(s)",
            path.display(),
            pack.lines.len(),
            pack.order.len()
        );
        pack
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file was there when the pack was loaded.
    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Assignment> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Every source line, matched or not, in file order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Raw lines before the first assignment, such as `<?php` and header comments.
    pub fn preamble(&self) -> &[String] {
        match self.order.first() {
            Some(key) => self.leading_lines(key),
            None => &[],
        }
    }

    /// Comment and blank lines between `key` and the assignment before it.
    ///
    /// For the first key this is the preamble.
    pub fn leading_lines(&self, key: &str) -> &[String] {
        self.leading.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn duplicates(&self) -> &[DuplicateKey] {
        &self.duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pattern::Quote;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn pattern() -> LinePattern {
        LinePattern::new("$GLOBALS", "translations").unwrap()
    }

    fn parse(lang: &str, content: &str) -> LanguagePack {
        LanguagePack::parse(Path::new("test.php"), lang, content, &pattern())
    }

    #[test]
    fn test_parse_keeps_key_order() {
        let pack = parse(
            "es",
            "<?php\n\
             $GLOBALS['translations']['es']['hi'] = 'Hola';\n\
             // farewells\n\
             $GLOBALS['translations']['es']['bye'] = 'Adiós';\n",
        );
        assert_eq!(pack.keys().collect::<Vec<_>>(), vec!["hi", "bye"]);
        assert_eq!(pack.len(), 2);
        assert_eq!(pack.get("bye").unwrap().value, "Adiós");
        assert_eq!(pack.lines().len(), 4);
        assert_eq!(pack.preamble(), &["<?php".to_string()]);
        assert_eq!(pack.leading_lines("bye"), &["// farewells".to_string()]);
    }

    #[test]
    fn test_leading_lines_skip_other_assignments() {
        let pack = parse(
            "es",
            "$GLOBALS['translations']['es']['hi'] = 'Hola';\n\
             $GLOBALS['translations']['fr']['hi'] = 'Salut';\n\
             \n\
             // farewells\n\
             $GLOBALS['translations']['es']['hi'] = 'Buenas';\n\
             $GLOBALS['translations']['es']['bye'] = 'Adiós';\n",
        );
        assert!(pack.preamble().is_empty());
        assert_eq!(
            pack.leading_lines("bye"),
            &["".to_string(), "// farewells".to_string()]
        );
        assert!(pack.leading_lines("missing").is_empty());
    }

    #[test]
    fn test_parse_records_quote_per_key() {
        let pack = parse(
            "en",
            "$GLOBALS['translations']['en']['hi'] = \"Hello\";\n\
             $GLOBALS['translations']['en']['bye'] = 'Bye';\n",
        );
        assert_eq!(pack.get("hi").unwrap().quote, Quote::Double);
        assert_eq!(pack.get("bye").unwrap().quote, Quote::Single);
    }

    #[test]
    fn test_duplicate_key_last_wins_and_is_reported() {
        let pack = parse(
            "es",
            "$GLOBALS['translations']['es']['hi'] = 'Hola';\n\
             $GLOBALS['translations']['es']['bye'] = 'Adiós';\n\
             $GLOBALS['translations']['es']['hi'] = 'Buenas';\n",
        );
        assert_eq!(pack.keys().collect::<Vec<_>>(), vec!["hi", "bye"]);
        assert_eq!(pack.get("hi").unwrap().value, "Buenas");
        assert_eq!(
            pack.duplicates(),
            &[DuplicateKey {
                key: "hi".to_string(),
                first_line: 1,
                line: 3,
            }]
        );
    }

    #[test]
    fn test_foreign_language_lines_are_not_entries() {
        let pack = parse(
            "en",
            "$GLOBALS['translations']['en']['hi'] = 'Hello';\n\
             $GLOBALS['translations']['fr']['hi'] = 'Salut';\n",
        );
        assert_eq!(pack.len(), 1);
        assert_eq!(pack.get("hi").unwrap().value, "Hello");
        assert_eq!(pack.lines().len(), 2);
    }

    #[test]
    fn test_preamble_is_empty_without_entries() {
        let pack = parse("en", "<?php\n// nothing yet\n");
        assert!(pack.is_empty());
        assert!(pack.preamble().is_empty());
        assert_eq!(pack.lines().len(), 2);
    }

    #[test]
    fn test_load_or_empty_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("en.php");
        let pack = LanguagePack::load_or_empty(&path, "en", &pattern()).unwrap();
        assert!(pack.is_empty());
        assert!(pack.lines().is_empty());
        assert!(!pack.exists());
        assert_eq!(pack.lang(), "en");
        assert_eq!(pack.path(), path.as_path());
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("es.php");
        let err = LanguagePack::load(&path, "es", &pattern()).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("es.php");
        fs::write(&path, "$GLOBALS['translations']['es']['hi'] = 'Hola';\r\n").unwrap();
        let pack = LanguagePack::load(&path, "es", &pattern()).unwrap();
        assert!(pack.exists());
        assert_eq!(pack.get("hi").unwrap().value, "Hola");
        assert_eq!(pack.get("hi").unwrap().shape.suffix, ";");
    }
}
