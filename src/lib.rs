pub mod checker;
pub mod cli;
pub mod config;
pub mod editor;
pub mod highlight;
pub mod menu;
pub mod session;
pub mod surface;

pub use checker::{CheckerError, SpellChecker, Speller};
pub use config::Config;
pub use editor::{Editor, Notice};
pub use highlight::{Reconciler, TagDelta};
pub use menu::{MenuItem, SuggestionMenu, MAX_MENU_SUGGESTIONS};
pub use session::SessionDictionary;
pub use surface::{Document, SurfaceError, TextSurface};

/// Half-open byte range `[start, end)` over the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    pub fn intersects(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether this span still addresses valid text in `text`.
    pub fn fits(&self, text: &str) -> bool {
        self.start <= self.end
            && self.end <= text.len()
            && text.is_char_boundary(self.start)
            && text.is_char_boundary(self.end)
    }
}

/// A maximal run of alphabetic text and where it sits in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains_is_half_open() {
        let span = Span::new(0, 3);
        assert!(span.contains(0));
        assert!(span.contains(2));
        assert!(!span.contains(3));
    }

    #[test]
    fn test_span_fits_rejects_split_chars() {
        let text = "café";
        assert!(Span::new(0, 5).fits(text));
        assert!(!Span::new(0, 4).fits(text));
        assert!(!Span::new(2, 9).fits(text));
    }
}
