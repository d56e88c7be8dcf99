// Word tokenization over the whole document.
// Offsets are byte offsets into the text handed in, so they can be used to
// slice it directly.

use crate::Token;
use unicode_segmentation::{GraphemeIndices, UnicodeSegmentation};

/// Lazily yields every word in `text`.
///
/// The iterator is `Clone`, so a scan can be restarted from any point
/// without re-reading the document.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens {
        text,
        graphemes: text.grapheme_indices(true),
    }
}

#[derive(Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    graphemes: GraphemeIndices<'a>,
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let mut start = None;
        let mut end = 0;

        for (offset, grapheme) in self.graphemes.by_ref() {
            if is_word_grapheme(grapheme) {
                if start.is_none() {
                    start = Some(offset);
                }
                end = offset + grapheme.len();
            } else if start.is_some() {
                break;
            }
        }

        let start = start?;
        Some(Token {
            word: self.text[start..end].to_string(),
            start,
            end,
        })
    }
}

fn is_word_grapheme(grapheme: &str) -> bool {
    grapheme.chars().next().is_some_and(char::is_alphabetic)
}

/// Find the token whose span contains `offset`.
pub fn token_at(text: &str, offset: usize) -> Option<Token> {
    tokenize(text)
        .take_while(|token| token.start <= offset)
        .find(|token| token.span().contains(offset))
}
