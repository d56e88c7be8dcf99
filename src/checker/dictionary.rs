use anyhow::{Context, Result};
use fst::automaton::Levenshtein;
use fst::{IntoStreamer, Map, MapBuilder, Streamer};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Word list backed by an FST map of word -> frequency.
pub struct Dictionary {
    map: Map<Vec<u8>>,
}

impl Dictionary {
    /// Load the installed dictionary for `language`, falling back to the
    /// embedded word list when none is installed.
    pub fn load(language: &str, fold_case: bool) -> Result<Self> {
        match Self::installed_path(language) {
            Some(path) if path.exists() => Self::load_from_path(&path, fold_case),
            _ => {
                tracing::debug!(language, "no installed dictionary, using embedded word list");
                Self::embedded(language)
            }
        }
    }

    /// Load a dictionary file. Files ending in `.dict` are prebuilt FSTs,
    /// anything else is read as a word list, lowercased when `fold_case` is
    /// set. Prebuilt FSTs are used as built.
    pub fn load_from_path(path: &Path, fold_case: bool) -> Result<Self> {
        if path.extension().and_then(|e| e.to_str()) == Some("dict") {
            let bytes = fs::read(path)
                .with_context(|| format!("Failed to open dictionary: {}", path.display()))?;
            let map = Map::new(bytes).context("Failed to parse dictionary")?;
            return Ok(Self { map });
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list: {}", path.display()))?;
        Self::from_entries(parse_word_list(&contents, fold_case))
    }

    /// Build an in-memory dictionary. Duplicate words keep their highest
    /// frequency.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut builder = MapBuilder::memory();
        for (word, freq) in collect_sorted(entries) {
            builder
                .insert(word.as_bytes(), freq)
                .context("Failed to insert word into dictionary")?;
        }
        let bytes = builder.into_inner().context("Failed to finalize dictionary")?;
        let map = Map::new(bytes).context("Failed to parse dictionary")?;
        Ok(Self { map })
    }

    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_entries(words.into_iter().map(|w| (w, 1)))
    }

    /// Check if word exists in dictionary
    pub fn contains(&self, word: &str) -> bool {
        self.map.contains_key(word.as_bytes())
    }

    pub fn frequency(&self, word: &str) -> Option<u64> {
        self.map.get(word.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// All words within `distance` edits of `word`, with their frequency.
    pub fn within_distance(&self, word: &str, distance: u32) -> Result<Vec<(String, u64)>> {
        let automaton = Levenshtein::new(word, distance)
            .with_context(|| format!("Failed to build edit automaton for '{}'", word))?;

        let mut results = Vec::new();
        let mut stream = self.map.search(automaton).into_stream();
        while let Some((key, freq)) = stream.next() {
            if let Ok(candidate) = std::str::from_utf8(key) {
                results.push((candidate.to_string(), freq));
            }
        }
        Ok(results)
    }

    /// Build an FST dictionary file from a word list.
    pub fn build_from_entries<I, S>(entries: I, output_path: &Path) -> Result<()>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let file = File::create(output_path)
            .with_context(|| format!("Failed to create dictionary: {}", output_path.display()))?;

        let writer = BufWriter::new(file);
        let mut builder = MapBuilder::new(writer).context("Failed to create FST builder")?;

        for (word, freq) in collect_sorted(entries) {
            builder
                .insert(word.as_bytes(), freq)
                .context("Failed to insert word into dictionary")?;
        }

        builder.finish().context("Failed to finalize dictionary")?;

        Ok(())
    }

    fn installed_path(language: &str) -> Option<PathBuf> {
        crate::config::Config::data_dir().map(|dir| dir.join(format!("{}.dict", language)))
    }

    fn embedded(language: &str) -> Result<Self> {
        let words = basic_wordlist(language);
        let count = words.len() as u64;
        // The list is ordered most common first.
        Self::from_entries(
            words
                .iter()
                .enumerate()
                .map(|(rank, word)| (*word, count - rank as u64)),
        )
    }
}

/// Parse `word` or `word frequency` lines; blank lines and `#` comments are
/// skipped.
pub fn parse_word_list(contents: &str, fold_case: bool) -> Vec<(String, u64)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let word = parts.next()?;
            let word = if fold_case {
                word.to_lowercase()
            } else {
                word.to_string()
            };
            let freq = parts.next().and_then(|f| f.parse().ok()).unwrap_or(1);
            Some((word, freq))
        })
        .collect()
}

fn collect_sorted<I, S>(entries: I) -> BTreeMap<String, u64>
where
    I: IntoIterator<Item = (S, u64)>,
    S: AsRef<str>,
{
    let mut sorted = BTreeMap::new();
    for (word, freq) in entries {
        let word = word.as_ref();
        if word.is_empty() {
            continue;
        }
        let slot = sorted.entry(word.to_string()).or_insert(freq);
        *slot = (*slot).max(freq);
    }
    sorted
}

fn basic_wordlist(language: &str) -> &'static [&'static str] {
    match language {
        "en_US" | "en_GB" => &[
            "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for",
            "not", "on", "with", "he", "as", "you", "do", "at", "this", "but", "his", "by",
            "from", "they", "we", "say", "her", "she", "or", "an", "will", "my", "one", "all",
            "would", "there", "their", "what", "so", "up", "out", "if", "about", "who", "get",
            "which", "go", "me", "when", "make", "can", "like", "time", "no", "just", "him",
            "know", "take", "people", "into", "year", "your", "good", "some", "could", "them",
            "see", "other", "than", "then", "now", "look", "only", "come", "its", "over",
            "think", "also", "back", "after", "use", "two", "how", "our", "work", "first",
            "well", "way", "even", "new", "want", "because", "any", "these", "give", "day",
            "most", "us", "is", "are", "was", "were", "has", "had", "word", "words", "cat",
            "dog", "sat", "mat", "ran", "text", "type", "spell", "check", "editor", "line",
            "write", "read", "menu", "here", "where", "very", "much", "many", "more", "such",
            "make", "made", "said", "each", "tell", "does", "set", "three", "small", "large",
            "quick", "brown", "fox", "jumps", "lazy", "hello", "world", "ten", "tea",
        ],
        _ => &["the", "be", "to", "of", "and", "a", "in", "that", "have", "i"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_build_and_load_dictionary() {
        let dir = tempdir().unwrap();
        let dict_path = dir.path().join("test.dict");

        let entries = vec![("hello", 10), ("world", 5), ("test", 1)];
        Dictionary::build_from_entries(entries, &dict_path).unwrap();

        let dict = Dictionary::load_from_path(&dict_path, true).unwrap();
        assert!(dict.contains("hello"));
        assert!(dict.contains("world"));
        assert!(!dict.contains("notfound"));
        assert_eq!(dict.frequency("hello"), Some(10));
    }

    #[test]
    fn test_load_plain_word_list() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "# comment\nThe 500\ncat\n\ncat 7\n").unwrap();

        let dict = Dictionary::load_from_path(&path, true).unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.frequency("the"), Some(500));
        assert_eq!(dict.frequency("cat"), Some(7));
    }

    #[test]
    fn test_word_list_keeps_case_when_not_folding() {
        let entries = parse_word_list("Paris 20
the
", false);
        assert_eq!(entries, vec![("Paris".to_string(), 20), ("the".to_string(), 1)]);

        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "Paris 20
the
").unwrap();
        let dict = Dictionary::load_from_path(&path, false).unwrap();
        assert!(dict.contains("Paris"));
        assert!(!dict.contains("paris"));
    }

    #[test]
    fn test_within_distance() {
        let dict = Dictionary::from_words(["the", "then", "ten", "cat"]).unwrap();
        let mut near: Vec<String> = dict
            .within_distance("teh", 2)
            .unwrap()
            .into_iter()
            .map(|(w, _)| w)
            .collect();
        near.sort();
        assert_eq!(near, vec!["ten", "the", "then"]);
    }

    #[test]
    fn test_embedded_list_is_usable() {
        let dict = Dictionary::embedded("en_US").unwrap();
        assert!(dict.contains("the"));
        assert!(dict.frequency("the") > dict.frequency("us"));
    }
}
