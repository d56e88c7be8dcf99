use crate::checker::tokenizer::token_at;
use crate::{Span, Token};

/// Most candidates a suggestion menu will list.
pub const MAX_MENU_SUGGESTIONS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    /// Replace the target word with this candidate.
    Replace(String),
    /// Disabled placeholder shown when the speller has nothing to offer.
    NoSuggestions,
    Separator,
    AddToDictionary,
}

impl MenuItem {
    pub fn label(&self) -> &str {
        match self {
            MenuItem::Replace(candidate) => candidate,
            MenuItem::NoSuggestions => "No suggestions",
            MenuItem::Separator => "",
            MenuItem::AddToDictionary => "Add to Dictionary",
        }
    }

    pub fn is_selectable(&self) -> bool {
        matches!(self, MenuItem::Replace(_) | MenuItem::AddToDictionary)
    }
}

/// Context menu for one misspelled word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionMenu {
    pub target: Token,
    pub items: Vec<MenuItem>,
}

impl SuggestionMenu {
    /// Lay out the menu for `target`. Only the first
    /// [`MAX_MENU_SUGGESTIONS`] candidates are kept, in the order given.
    pub fn new(target: Token, suggestions: Vec<String>) -> Self {
        let mut items: Vec<MenuItem> = suggestions
            .into_iter()
            .take(MAX_MENU_SUGGESTIONS)
            .map(MenuItem::Replace)
            .collect();
        if items.is_empty() {
            items.push(MenuItem::NoSuggestions);
        }
        items.push(MenuItem::Separator);
        items.push(MenuItem::AddToDictionary);

        Self { target, items }
    }

    pub fn span(&self) -> Span {
        self.target.span()
    }

    /// The replacement candidates, best first.
    pub fn suggestions(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match item {
                MenuItem::Replace(candidate) => Some(candidate.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Find the word under a right-click at `offset` if it is misspelled.
pub fn menu_target<F>(text: &str, offset: usize, is_misspelled: F) -> Option<Token>
where
    F: FnOnce(&str) -> bool,
{
    token_at(text, offset).filter(|token| is_misspelled(&token.word))
}
