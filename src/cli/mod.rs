pub mod dict;
pub mod interactive;
pub mod output;

use crate::checker::Speller;
use crate::editor::Editor;
use crate::highlight::TagDelta;
use crate::surface::TextSurface;
use output::{line_col, Misspelling, Report};

/// Describe the highlighted words of `editor` after `delta`, with the
/// suggestions a right-click on each would offer.
pub fn build_report<S: TextSurface, P: Speller>(
    editor: &mut Editor<S, P>,
    delta: &TagDelta,
) -> Report {
    let text = editor.surface().text();
    let spans: Vec<_> = editor.reconciler().active().collect();

    let misspellings = spans
        .into_iter()
        .filter_map(|span| {
            let menu = editor.on_right_click(span.start)?;
            let (line, column) = line_col(&text, span.start);
            Some(Misspelling {
                word: menu.target.word.clone(),
                start: span.start,
                end: span.end,
                line,
                column,
                suggestions: menu.suggestions().into_iter().map(str::to_string).collect(),
            })
        })
        .collect();

    Report {
        words: delta.words,
        errors: delta.errors,
        misspellings,
    }
}
