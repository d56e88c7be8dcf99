//! Input handlers tying the tokenizer, reconciler, session dictionary and
//! suggestion menu to one document.
//!
//! Every handler runs to completion on the calling thread and returns what
//! it changed; there is no background work.

use crate::checker::tokenizer::tokenize;
use crate::checker::{CheckerError, Speller};
use crate::highlight::{Reconciler, TagDelta};
use crate::menu::{menu_target, MenuItem, SuggestionMenu, MAX_MENU_SUGGESTIONS};
use crate::session::SessionDictionary;
use crate::surface::{SurfaceError, TextSurface};
use crate::Span;
use std::fmt;

/// A non-blocking message for the user, e.g. shown in a status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

pub struct Editor<S, P> {
    surface: S,
    speller: P,
    session: SessionDictionary,
    reconciler: Reconciler,
    max_suggestions: usize,
    status: String,
    notices: Vec<Notice>,
    speller_failed: bool,
}

impl<S: TextSurface, P: Speller> Editor<S, P> {
    pub fn new(surface: S, speller: P) -> Self {
        Self {
            surface,
            speller,
            session: SessionDictionary::new(),
            reconciler: Reconciler::new(),
            max_suggestions: MAX_MENU_SUGGESTIONS,
            status: "Ready".to_string(),
            notices: Vec::new(),
            speller_failed: false,
        }
    }

    /// How many candidates to request from the speller per right-click.
    /// Menus still show at most [`MAX_MENU_SUGGESTIONS`].
    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn session(&self) -> &SessionDictionary {
        &self.session
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Key released: rescan the document and fix up highlights.
    pub fn on_key_release(&mut self) -> TagDelta {
        self.reconcile()
    }

    /// Apply a text edit made by the user. Highlights are refreshed on the
    /// following key release.
    pub fn edit(&mut self, span: Span, text: &str) -> Result<(), SurfaceError> {
        self.surface.replace(span, text)?;
        self.reconciler.note_edit(span, text.len());
        Ok(())
    }

    /// Right click at `offset`: the menu for the misspelled word under it,
    /// if any.
    pub fn on_right_click(&mut self, offset: usize) -> Option<SuggestionMenu> {
        let text = self.surface.text();
        let mut failure = None;
        let target = menu_target(&text, offset, |word| {
            is_misspelled(&self.speller, &self.session, word, &mut failure)
        });
        if let Some(err) = failure {
            self.report(err);
        }
        let target = target?;

        let suggestions = match self.speller.suggest(&target.word, self.max_suggestions) {
            Ok(suggestions) => suggestions,
            Err(err) => {
                self.report(err);
                Vec::new()
            }
        };

        Some(SuggestionMenu::new(target, suggestions))
    }

    /// Act on a menu entry. Returns `None` for entries that do nothing.
    pub fn on_menu_select(&mut self, menu: &SuggestionMenu, item: &MenuItem) -> Option<TagDelta> {
        match item {
            MenuItem::Replace(candidate) => Some(self.replace_word(menu, candidate)),
            MenuItem::AddToDictionary => Some(self.add_to_dictionary(&menu.target.word)),
            MenuItem::NoSuggestions | MenuItem::Separator => None,
        }
    }

    /// Accept `word` for the rest of the session and untag every occurrence.
    pub fn add_to_dictionary(&mut self, word: &str) -> TagDelta {
        self.session.add(word);
        tracing::info!(word, "added to session dictionary");

        let delta = self.reconcile();
        self.status = format!("'{}' added to session dictionary.", word);
        delta
    }

    fn replace_word(&mut self, menu: &SuggestionMenu, candidate: &str) -> TagDelta {
        let span = menu.span();
        let text = self.surface.text();

        // The document may have changed while the menu was open.
        if span.fits(&text) && text[span.start..span.end] == menu.target.word {
            match self.edit(span, candidate) {
                Ok(()) => {
                    tracing::debug!(from = %menu.target.word, to = candidate, "replaced word")
                }
                Err(err) => tracing::debug!(error = %err, "replacement skipped"),
            }
        } else {
            tracing::debug!(word = %menu.target.word, "menu target moved, replacement skipped");
        }

        self.reconcile()
    }

    fn reconcile(&mut self) -> TagDelta {
        let text = self.surface.text();
        let speller = &self.speller;
        let session = &self.session;
        let mut failure = None;

        let delta = self.reconciler.reconcile(
            tokenize(&text),
            |word| is_misspelled(speller, session, word, &mut failure),
            &mut self.surface,
        );

        if let Some(err) = failure {
            self.report(err);
        }
        self.status = delta.status();
        delta
    }

    fn report(&mut self, err: CheckerError) {
        if self.speller_failed {
            tracing::debug!(error = %err, "spell checker still failing");
            return;
        }
        tracing::warn!(error = %err, "spell checker failed, words left unmarked");
        self.speller_failed = true;
        self.notices.push(Notice {
            message: format!("Spell checking is unavailable: {}", err),
        });
    }
}

/// A word is misspelled when the session has not accepted it and the
/// speller does not know it. Speller failures count as "not misspelled";
/// the first one is kept in `failure`.
fn is_misspelled<P: Speller>(
    speller: &P,
    session: &SessionDictionary,
    word: &str,
    failure: &mut Option<CheckerError>,
) -> bool {
    if session.contains(word) {
        return false;
    }
    match speller.is_known(word) {
        Ok(known) => !known,
        Err(err) => {
            failure.get_or_insert(err);
            false
        }
    }
}
