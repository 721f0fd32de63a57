//! Splits a value into markup and text so only the text gets translated.
//!
//! Anything between `<` and `>` is markup, however messy the rest of the value
//! is. Quotes inside tags are not interpreted.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chunk<'a> {
    Markup(&'a str),
    Text(&'a str),
}

impl<'a> Chunk<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Chunk::Markup(s) | Chunk::Text(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("'>' at byte {0} closes no tag")]
    StrayClose(usize),
    #[error("'<' at byte {0} opens a tag inside another tag")]
    NestedOpen(usize),
    #[error("tag opened at byte {0} is never closed")]
    Unclosed(usize),
}

/// Split `value` into alternating text and markup chunks.
///
/// Concatenating the chunks always yields `value` again.
pub fn split_markup(value: &str) -> Result<Vec<Chunk<'_>>, MarkupError> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut tag_start: Option<usize> = None;

    for (i, c) in value.char_indices() {
        match (c, tag_start) {
            ('<', Some(_)) => return Err(MarkupError::NestedOpen(i)),
            ('<', None) => {
                if i > start {
                    chunks.push(Chunk::Text(&value[start..i]));
                }
                tag_start = Some(i);
                start = i;
            }
            ('>', Some(open)) => {
                chunks.push(Chunk::Markup(&value[open..=i]));
                tag_start = None;
                start = i + 1;
            }
            ('>', None) => return Err(MarkupError::StrayClose(i)),
            _ => {}
        }
    }

    if let Some(open) = tag_start {
        return Err(MarkupError::Unclosed(open));
    }
    if start < value.len() {
        chunks.push(Chunk::Text(&value[start..]));
    }
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_text_is_one_chunk() {
        assert_eq!(split_markup("Hola").unwrap(), vec![Chunk::Text("Hola")]);
    }

    #[test]
    fn test_empty_value_has_no_chunks() {
        assert!(split_markup("").unwrap().is_empty());
    }

    #[test]
    fn test_text_and_tags_alternate() {
        let chunks = split_markup("Click <a href=\"/x\">here</a> now").unwrap();
        assert_eq!(
            chunks,
            vec![
                Chunk::Text("Click "),
                Chunk::Markup("<a href=\"/x\">"),
                Chunk::Text("here"),
                Chunk::Markup("</a>"),
                Chunk::Text(" now"),
            ]
        );
    }

    #[test]
    fn test_leading_and_adjacent_tags() {
        let chunks = split_markup("<b><i>Hi</i></b>").unwrap();
        assert_eq!(
            chunks,
            vec![
                Chunk::Markup("<b>"),
                Chunk::Markup("<i>"),
                Chunk::Text("Hi"),
                Chunk::Markup("</i>"),
                Chunk::Markup("</b>"),
            ]
        );
        let joined: String = chunks.iter().map(Chunk::as_str).collect();
        assert_eq!(joined, "<b><i>Hi</i></b>");
    }

    #[test]
    fn test_unbalanced_markup() {
        assert_eq!(split_markup("a > b"), Err(MarkupError::StrayClose(2)));
        assert_eq!(split_markup("<a <b>"), Err(MarkupError::NestedOpen(3)));
        assert_eq!(split_markup("x <br"), Err(MarkupError::Unclosed(2)));
    }
}
