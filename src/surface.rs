use crate::Span;
use ropey::Rope;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("span {start}..{end} is outside the document ({len} bytes)")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("span {start}..{end} splits a character")]
    NotCharBoundary { start: usize, end: usize },
}

/// The text widget the editor draws into.
///
/// Offsets are byte offsets into [`TextSurface::text`]. Tag calls carry a
/// single "misspelled" style.
pub trait TextSurface {
    fn text(&self) -> String;

    fn len(&self) -> usize {
        self.text().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn add_tag(&mut self, span: Span);
    fn remove_tag(&mut self, span: Span);

    /// Replace the text in `span`. Tags touching the span are dropped and
    /// tags after it move with the text. Both ends of `span` must sit on
    /// char boundaries.
    fn replace(&mut self, span: Span, text: &str) -> Result<(), SurfaceError>;
}

/// In-memory document used by the terminal front end and in tests.
#[derive(Debug, Clone)]
pub struct Document {
    rope: Rope,
    tags: BTreeSet<Span>,
    tag_ops: usize,
}

impl Document {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            tags: BTreeSet::new(),
            tag_ops: 0,
        }
    }

    pub fn tags(&self) -> impl Iterator<Item = Span> + '_ {
        self.tags.iter().copied()
    }

    /// Number of add/remove tag calls received so far.
    pub fn tag_ops(&self) -> usize {
        self.tag_ops
    }

    pub fn slice(&self, span: Span) -> Option<String> {
        let text = self.rope.to_string();
        span.fits(&text).then(|| text[span.start..span.end].to_string())
    }

    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), SurfaceError> {
        self.replace(Span::new(offset, offset), text)
    }

    pub fn delete(&mut self, span: Span) -> Result<(), SurfaceError> {
        self.replace(span, "")
    }
}

impl TextSurface for Document {
    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn len(&self) -> usize {
        self.rope.len_bytes()
    }

    fn add_tag(&mut self, span: Span) {
        self.tag_ops += 1;
        self.tags.insert(span);
    }

    fn remove_tag(&mut self, span: Span) {
        self.tag_ops += 1;
        self.tags.remove(&span);
    }

    fn replace(&mut self, span: Span, text: &str) -> Result<(), SurfaceError> {
        let len = self.rope.len_bytes();
        if span.start > span.end || span.end > len {
            return Err(SurfaceError::OutOfBounds {
                start: span.start,
                end: span.end,
                len,
            });
        }

        let start = self.rope.byte_to_char(span.start);
        let end = self.rope.byte_to_char(span.end);
        // byte_to_char rounds down inside a char.
        if self.rope.char_to_byte(start) != span.start
            || self.rope.char_to_byte(end) != span.end
        {
            return Err(SurfaceError::NotCharBoundary {
                start: span.start,
                end: span.end,
            });
        }

        self.rope.remove(start..end);
        self.rope.insert(start, text);
        self.tags = shift_spans(&self.tags, span, text.len());
        Ok(())
    }
}

/// Apply an edit of `edited` (replaced by `inserted` bytes) to a span set:
/// spans touching the edit are dropped, later spans shift.
pub(crate) fn shift_spans(
    spans: &BTreeSet<Span>,
    edited: Span,
    inserted: usize,
) -> BTreeSet<Span> {
    spans
        .iter()
        .filter_map(|span| {
            if span.intersects(&edited) {
                None
            } else if span.start >= edited.end {
                Some(Span::new(
                    span.start + inserted - edited.len(),
                    span.end + inserted - edited.len(),
                ))
            } else {
                Some(*span)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_text() {
        let mut doc = Document::new("Teh cat sat.");
        doc.replace(Span::new(0, 3), "The").unwrap();
        assert_eq!(doc.text(), "The cat sat.");
        doc.insert(12, " Done").unwrap();
        assert_eq!(doc.text(), "The cat sat. Done");
        doc.delete(Span::new(3, 7)).unwrap();
        assert_eq!(doc.text(), "The sat. Done");
    }

    #[test]
    fn test_replace_out_of_bounds() {
        let mut doc = Document::new("abc");
        assert_eq!(
            doc.replace(Span::new(2, 9), "x"),
            Err(SurfaceError::OutOfBounds { start: 2, end: 9, len: 3 })
        );
        assert_eq!(doc.text(), "abc");
    }

    #[test]
    fn test_tags_follow_edits() {
        let mut doc = Document::new("Teh cat sta.");
        doc.add_tag(Span::new(0, 3));
        doc.add_tag(Span::new(8, 11));

        doc.replace(Span::new(0, 3), "There").unwrap();
        let tags: Vec<_> = doc.tags().collect();
        assert_eq!(tags, vec![Span::new(10, 13)]);
        assert_eq!(doc.slice(Span::new(10, 13)).as_deref(), Some("sta"));
    }

    #[test]
    fn test_typing_inside_a_word_drops_its_tag() {
        let mut doc = Document::new("Teh cat");
        doc.add_tag(Span::new(0, 3));
        doc.insert(1, "x").unwrap();
        assert_eq!(doc.tags().count(), 0);
    }

    #[test]
    fn test_multibyte_replace() {
        let mut doc = Document::new("café ok");
        doc.replace(Span::new(0, 5), "tea").unwrap();
        assert_eq!(doc.text(), "tea ok");
    }

    #[test]
    fn test_replace_rejects_split_chars() {
        let mut doc = Document::new("é zorp");
        doc.add_tag(Span::new(3, 7));

        assert_eq!(
            doc.replace(Span::new(1, 3), ""),
            Err(SurfaceError::NotCharBoundary { start: 1, end: 3 })
        );
        assert_eq!(doc.text(), "é zorp");
        assert_eq!(doc.tags().collect::<Vec<_>>(), vec![Span::new(3, 7)]);
    }
}
