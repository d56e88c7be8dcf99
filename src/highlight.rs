//! Keeps the "misspelled" tags on a [`TextSurface`] in step with the text.
//!
//! Every pass recomputes the full set of misspelled spans and applies only
//! the difference against what was tagged after the previous pass, so spans
//! that stay misspelled are never touched and do not flicker.

use crate::surface::{shift_spans, TextSurface};
use crate::{Span, Token};
use std::collections::BTreeSet;

/// Tag operations performed by one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDelta {
    pub added: Vec<Span>,
    pub removed: Vec<Span>,
    /// Previously tagged spans that no longer fit the document.
    pub dropped: Vec<Span>,
    pub words: usize,
    pub errors: usize,
}

impl TagDelta {
    /// Whether the pass issued any surface operation.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn status(&self) -> String {
        format!("Words: {} | Errors Found: {}", self.words, self.errors)
    }
}

#[derive(Debug, Default)]
pub struct Reconciler {
    active: BTreeSet<Span>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spans currently carrying the tag, in document order.
    pub fn active(&self) -> impl Iterator<Item = Span> + '_ {
        self.active.iter().copied()
    }

    /// Run one pass over `tokens` and apply the tag diff to `surface`.
    pub fn reconcile<S, I, F>(
        &mut self,
        tokens: I,
        mut is_misspelled: F,
        surface: &mut S,
    ) -> TagDelta
    where
        S: TextSurface + ?Sized,
        I: IntoIterator<Item = Token>,
        F: FnMut(&str) -> bool,
    {
        let text = surface.text();
        let mut delta = TagDelta::default();
        let mut desired = BTreeSet::new();

        for token in tokens {
            delta.words += 1;
            let span = token.span();
            if !span.fits(&text) {
                continue;
            }
            if is_misspelled(&token.word) {
                desired.insert(span);
            }
        }
        delta.errors = desired.len();

        for span in self.active.difference(&desired) {
            if span.fits(&text) {
                surface.remove_tag(*span);
                delta.removed.push(*span);
            } else {
                delta.dropped.push(*span);
            }
        }

        for span in desired.difference(&self.active) {
            surface.add_tag(*span);
            delta.added.push(*span);
        }

        self.active = desired;

        tracing::debug!(
            words = delta.words,
            errors = delta.errors,
            added = delta.added.len(),
            removed = delta.removed.len(),
            dropped = delta.dropped.len(),
            "reconciled highlights"
        );

        delta
    }

    /// Track an edit of `edited` that replaced it with `inserted` bytes:
    /// spans touching the edit are forgotten, later ones shift with the text.
    pub fn note_edit(&mut self, edited: Span, inserted: usize) {
        self.active = shift_spans(&self.active, edited, inserted);
    }
}
