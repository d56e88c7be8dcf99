pub mod dictionary;
pub mod suggestions;
pub mod tokenizer;

use crate::Config;
use anyhow::{Context, Result};
use dictionary::Dictionary;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckerError {
    #[error("spell checker unavailable: {0}")]
    Unavailable(String),
    #[error("failed to look up '{word}': {reason}")]
    Lookup { word: String, reason: String },
}

/// The spell-check collaborator consulted by the editor.
///
/// `suggest` returns at most `limit` candidates, best first.
pub trait Speller {
    fn is_known(&self, word: &str) -> Result<bool, CheckerError>;
    fn suggest(&self, word: &str, limit: usize) -> Result<Vec<String>, CheckerError>;
}

impl<S: Speller + ?Sized> Speller for &S {
    fn is_known(&self, word: &str) -> Result<bool, CheckerError> {
        (**self).is_known(word)
    }

    fn suggest(&self, word: &str, limit: usize) -> Result<Vec<String>, CheckerError> {
        (**self).suggest(word, limit)
    }
}

impl<S: Speller + ?Sized> Speller for Box<S> {
    fn is_known(&self, word: &str) -> Result<bool, CheckerError> {
        (**self).is_known(word)
    }

    fn suggest(&self, word: &str, limit: usize) -> Result<Vec<String>, CheckerError> {
        (**self).suggest(word, limit)
    }
}

/// Dictionary-backed speller.
pub struct SpellChecker {
    dictionary: Dictionary,
    personal_words: HashSet<String>,
    ignore_patterns: Vec<Regex>,
    case_sensitive: bool,
}

impl SpellChecker {
    pub fn new(config: &Config) -> Result<Self> {
        let fold_case = !config.case_sensitive;
        let dictionary = match &config.dictionary {
            Some(path) => Dictionary::load_from_path(path, fold_case)?,
            None => Dictionary::load(&config.language, fold_case)?,
        };

        let mut checker = Self::with_dictionary(dictionary, &config.ignore_patterns)
            .case_sensitive(config.case_sensitive);

        // Personal words are read-only here; nothing is ever written back.
        if let Some(personal_dict_path) = &config.personal_dictionary {
            if personal_dict_path.exists() {
                let content = fs::read_to_string(personal_dict_path)
                    .context("Failed to read personal dictionary")?;
                checker.add_personal_words(content.lines());
            }
        }

        tracing::debug!(
            language = %config.language,
            words = checker.dictionary.len(),
            personal = checker.personal_words.len(),
            "spell checker ready"
        );

        Ok(checker)
    }

    pub fn with_dictionary(dictionary: Dictionary, ignore_patterns: &[String]) -> Self {
        let mut compiled = Vec::new();
        for pattern in ignore_patterns {
            match Regex::new(pattern) {
                Ok(re) => compiled.push(re),
                Err(e) => tracing::warn!(pattern = %pattern, error = %e, "invalid ignore pattern"),
            }
        }

        Self {
            dictionary,
            personal_words: HashSet::new(),
            ignore_patterns: compiled,
            case_sensitive: false,
        }
    }

    /// Match words exactly instead of lowercasing them. A capitalized word
    /// ("The") still matches its lowercase entry.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn add_personal_words<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) {
        for line in lines {
            let word = line.trim();
            if !word.is_empty() && !word.starts_with('#') {
                let word = if self.case_sensitive {
                    word.to_string()
                } else {
                    word.to_lowercase()
                };
                self.personal_words.insert(word);
            }
        }
    }

    /// Forms to look up, most specific first.
    fn lookup_forms(&self, word: &str) -> Vec<String> {
        if !self.case_sensitive {
            return vec![word.to_lowercase()];
        }

        let mut forms = vec![word.to_string()];
        if let Some(lowered) = uncapitalize(word) {
            forms.push(lowered);
        }
        forms
    }

    fn should_ignore(&self, word: &str) -> bool {
        // Skip single characters
        if word.chars().count() <= 1 {
            return true;
        }

        self.ignore_patterns.iter().any(|pattern| pattern.is_match(word))
    }
}

impl Speller for SpellChecker {
    fn is_known(&self, word: &str) -> Result<bool, CheckerError> {
        if self.should_ignore(word) {
            return Ok(true);
        }

        Ok(self
            .lookup_forms(word)
            .iter()
            .any(|form| self.personal_words.contains(form) || self.dictionary.contains(form)))
    }

    fn suggest(&self, word: &str, limit: usize) -> Result<Vec<String>, CheckerError> {
        let forms = self.lookup_forms(word);
        let lookup = forms.last().map(String::as_str).unwrap_or(word);
        let candidates = suggestions::generate(lookup, &self.dictionary, limit).map_err(|e| {
            CheckerError::Lookup {
                word: word.to_string(),
                reason: e.to_string(),
            }
        })?;

        let mut seen = HashSet::new();
        Ok(candidates
            .iter()
            .map(|candidate| suggestions::match_case(word, candidate))
            .filter(|candidate| seen.insert(candidate.clone()))
            .collect())
    }
}

/// "Word" -> "word"; `None` unless only the first char is uppercase.
fn uncapitalize(word: &str) -> Option<String> {
    let mut chars = word.chars();
    let first = chars.next().filter(|c| c.is_uppercase())?;
    if chars.clone().any(char::is_uppercase) {
        return None;
    }

    let mut lowered: String = first.to_lowercase().collect();
    lowered.extend(chars);
    Some(lowered)
}

/// Stand-in used when no dictionary could be loaded: every call fails.
pub struct Unavailable {
    reason: String,
}

impl Unavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Speller for Unavailable {
    fn is_known(&self, _word: &str) -> Result<bool, CheckerError> {
        Err(CheckerError::Unavailable(self.reason.clone()))
    }

    fn suggest(&self, _word: &str, _limit: usize) -> Result<Vec<String>, CheckerError> {
        Err(CheckerError::Unavailable(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(words: &[&str]) -> SpellChecker {
        let dictionary = Dictionary::from_words(words.iter().copied()).unwrap();
        SpellChecker::with_dictionary(dictionary, &Config::default().ignore_patterns)
    }

    #[test]
    fn test_known_words_are_case_insensitive() {
        let checker = checker(&["the", "cat"]);
        assert!(checker.is_known("The").unwrap());
        assert!(checker.is_known("CAT").unwrap());
        assert!(!checker.is_known("Teh").unwrap());
    }

    #[test]
    fn test_ignores_single_letters_and_acronyms() {
        let checker = checker(&["the"]);
        assert!(checker.is_known("x").unwrap());
        assert!(checker.is_known("NASA").unwrap());
        assert!(!checker.is_known("Nasa").unwrap());
    }

    #[test]
    fn test_personal_words() {
        let mut checker = checker(&["the"]);
        checker.add_personal_words(["# mine", "Rustacean", ""]);
        assert!(checker.is_known("rustacean").unwrap());
    }

    #[test]
    fn test_suggest_matches_capitalization() {
        let checker = checker(&["the", "ten", "cat"]);
        assert_eq!(checker.suggest("Teh", 7).unwrap(), vec!["The", "Ten"]);
        assert_eq!(checker.suggest("TEH", 1).unwrap(), vec!["THE"]);
    }

    #[test]
    fn test_swapped_letters_rank_first() {
        let dictionary = Dictionary::from_entries([("the", 1000), ("ten", 5), ("tea", 5)]).unwrap();
        let checker = SpellChecker::with_dictionary(dictionary, &[]);
        assert_eq!(checker.suggest("teh", 3).unwrap(), vec!["the", "tea", "ten"]);
    }

    #[test]
    fn test_case_sensitive_lookups() {
        let dictionary = Dictionary::from_words(["Paris", "the"]).unwrap();
        let mut checker = SpellChecker::with_dictionary(dictionary, &[]).case_sensitive(true);
        checker.add_personal_words(["Rustacean"]);

        assert!(checker.is_known("Paris").unwrap());
        assert!(!checker.is_known("paris").unwrap());
        assert!(checker.is_known("the").unwrap());
        assert!(checker.is_known("The").unwrap());
        assert!(!checker.is_known("tHe").unwrap());
        assert!(checker.is_known("Rustacean").unwrap());
        assert!(!checker.is_known("rustacean").unwrap());

        assert_eq!(checker.suggest("Teh", 3).unwrap(), vec!["The"]);
        assert_eq!(checker.suggest("Pariss", 3).unwrap(), vec!["Paris"]);
    }

    #[test]
    fn test_case_sensitive_config_keeps_word_list_case() {
        let dir = tempfile::tempdir().unwrap();
        let words = dir.path().join("words.txt");
        fs::write(&words, "Paris 10
the 50
").unwrap();

        let config = Config {
            dictionary: Some(words),
            personal_dictionary: None,
            case_sensitive: true,
            ..Config::default()
        };
        let checker = SpellChecker::new(&config).unwrap();
        assert!(checker.is_known("Paris").unwrap());
        assert!(!checker.is_known("paris").unwrap());
        assert!(checker.is_known("The").unwrap());
    }

    #[test]
    fn test_unavailable_always_fails() {
        let speller = Unavailable::new("dictionary missing");
        assert!(matches!(
            speller.is_known("word"),
            Err(CheckerError::Unavailable(_))
        ));
        assert!(speller.suggest("word", 3).is_err());
    }
}
