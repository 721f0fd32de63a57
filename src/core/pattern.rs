//! Single-line assignment matcher.
//!
//! Recognizes lines of the form
//! `$GLOBALS['translations']['es']['hi'] = 'Hola';` where the globals name and
//! the languages key are configurable. Everything else is "no match".

use clap::ValueEnum;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Quote character wrapping a string on a source line.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Quote {
    #[default]
    Single,
    Double,
}

impl Quote {
    pub fn as_char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }

    pub fn other(self) -> Self {
        match self {
            Quote::Single => Quote::Double,
            Quote::Double => Quote::Single,
        }
    }

    /// Escape `text` for use between this quote.
    ///
    /// The quote becomes `\q`. A run of backslashes right before a quote or at
    /// the end of the text is doubled so it cannot swallow the quote. Other
    /// backslashes are left as they are.
    pub fn escape(self, text: &str) -> String {
        let q = self.as_char();
        let mut out = String::with_capacity(text.len());
        let mut run = 0;
        for c in text.chars() {
            if c == '\\' {
                run += 1;
                continue;
            }
            if c == q {
                push_backslashes(&mut out, run * 2 + 1);
            } else {
                push_backslashes(&mut out, run);
            }
            out.push(c);
            run = 0;
        }
        push_backslashes(&mut out, run * 2);
        out
    }

    /// Inverse of [`Quote::escape`] for text read between this quote.
    pub fn unescape(self, text: &str) -> String {
        let q = self.as_char();
        let mut out = String::with_capacity(text.len());
        let mut run = 0;
        for c in text.chars() {
            if c == '\\' {
                run += 1;
                continue;
            }
            if c == q {
                push_backslashes(&mut out, run / 2);
            } else {
                push_backslashes(&mut out, run);
            }
            out.push(c);
            run = 0;
        }
        push_backslashes(&mut out, run / 2);
        out
    }

    /// Wrap `text` in this quote, escaping as needed.
    pub fn wrap(self, text: &str) -> String {
        let q = self.as_char();
        format!("{q}{}{q}", self.escape(text))
    }
}

fn push_backslashes(out: &mut String, count: usize) {
    out.extend(std::iter::repeat_n('\\', count));
}

/// Layout of a matched line apart from the key and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineShape {
    pub indent: String,
    pub languages_key_quote: Quote,
    pub lang_quote: Quote,
    pub key_quote: Quote,
    /// Everything after the value's closing quote, usually `;`.
    pub suffix: String,
}

impl LineShape {
    /// Shape used for lines the tool writes itself.
    pub fn canonical(quote: Quote) -> Self {
        Self {
            indent: String::new(),
            languages_key_quote: quote,
            lang_quote: quote,
            key_quote: quote,
            suffix: ";".to_string(),
        }
    }
}

/// One `key = value` assignment extracted from a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub lang: String,
    /// Key text exactly as written between its quotes.
    pub key: String,
    /// Value with escaped quotes resolved.
    pub value: String,
    pub quote: Quote,
    pub shape: LineShape,
}

/// Matcher for the `{globals}['{languages_key}']['{lang}']['{key}'] = '{value}';` grammar.
#[derive(Debug, Clone)]
pub struct LinePattern {
    globals_name: String,
    languages_key: String,
    regex: Regex,
}

impl LinePattern {
    pub fn new(globals_name: &str, languages_key: &str) -> Result<Self> {
        let source = format!(
            r"^(?P<indent>\s*){globals}\s*\[\s*{lk}\s*\]\s*\[\s*{lang}\s*\]\s*\[\s*{key}\s*\]\s*=\s*{value}(?P<suffix>.*)$",
            globals = regex::escape(globals_name),
            lk = quoted("lk", Some(languages_key)),
            lang = quoted("lang", None),
            key = quoted("key", None),
            value = quoted("value", None),
        );
        Ok(Self {
            globals_name: globals_name.to_string(),
            languages_key: languages_key.to_string(),
            regex: Regex::new(&source)?,
        })
    }

    pub fn globals_name(&self) -> &str {
        &self.globals_name
    }

    /// Human-readable prefix, e.g. `$GLOBALS['translations']`.
    pub fn prefix(&self) -> String {
        format!("{}['{}']", self.globals_name, self.languages_key)
    }

    /// Try to read `line` as an assignment. Returns `None` for anything else.
    pub fn match_line(&self, line: &str) -> Option<Assignment> {
        let caps = self.regex.captures(line)?;
        let (_, languages_key_quote) = quoted_capture(&caps, "lk")?;
        let (lang, lang_quote) = quoted_capture(&caps, "lang")?;
        let (key, key_quote) = quoted_capture(&caps, "key")?;
        let (raw_value, quote) = quoted_capture(&caps, "value")?;

        Some(Assignment {
            lang: lang.to_string(),
            key: key.to_string(),
            value: quote.unescape(raw_value),
            quote,
            shape: LineShape {
                indent: caps["indent"].to_string(),
                languages_key_quote,
                lang_quote,
                key_quote,
                suffix: caps["suffix"].to_string(),
            },
        })
    }

    /// Emit `assignment` as a source line using its recorded shape.
    pub fn render(&self, assignment: &Assignment) -> String {
        let shape = &assignment.shape;
        let lkq = shape.languages_key_quote.as_char();
        let lq = shape.lang_quote.as_char();
        let kq = shape.key_quote.as_char();
        format!(
            "{}{}[{lkq}{}{lkq}][{lq}{}{lq}][{kq}{}{kq}] = {}{}",
            shape.indent,
            self.globals_name,
            self.languages_key,
            assignment.lang,
            assignment.key,
            assignment.quote.wrap(&assignment.value),
            shape.suffix,
        )
    }
}

/// Regex fragment for a string in either quote style.
///
/// With `literal` the content must equal it exactly; otherwise any content is
/// accepted as long as the closing quote is not backslash-escaped.
fn quoted(name: &str, literal: Option<&str>) -> String {
    let (single, double) = match literal {
        Some(text) => {
            let text = regex::escape(text);
            (text.clone(), text)
        }
        None => (
            r"(?:[^'\\]|\\.)*".to_string(),
            r#"(?:[^"\\]|\\.)*"#.to_string(),
        ),
    };
    format!(r#"(?:'(?P<{name}_s>{single})'|"(?P<{name}_d>{double})")"#)
}

fn quoted_capture<'h>(caps: &Captures<'h>, name: &str) -> Option<(&'h str, Quote)> {
    if let Some(m) = caps.name(&format!("{name}_s")) {
        return Some((m.as_str(), Quote::Single));
    }
    caps.name(&format!("{name}_d"))
        .map(|m| (m.as_str(), Quote::Double))
}
