use std::collections::HashSet;

/// Words accepted with "Add to Dictionary" during this run.
///
/// Lives only as long as the editor that owns it; nothing is written to
/// disk. Lookups ignore case.
#[derive(Debug, Clone, Default)]
pub struct SessionDictionary {
    words: HashSet<String>,
}

impl SessionDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the word was already present.
    pub fn add(&mut self, word: &str) -> bool {
        self.words.insert(word.to_lowercase())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        let mut session = SessionDictionary::new();
        assert!(session.is_empty());
        assert!(session.add("Teh"));
        assert!(!session.add("teh"));
        assert!(session.contains("TEH"));
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let mut first = SessionDictionary::new();
        first.add("zorp");
        let second = SessionDictionary::new();
        assert!(!second.contains("zorp"));
    }
}
