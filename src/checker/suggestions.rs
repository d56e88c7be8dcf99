use crate::checker::dictionary::Dictionary;
use anyhow::Result;
use std::cmp::Reverse;

/// Largest edit distance searched for candidates.
const MAX_DISTANCE: u32 = 2;

/// Generate spelling suggestions ranked by likelihood.
///
/// Candidates one edit away (an adjacent swap counts as one) always rank
/// above candidates two edits away;
/// within the same distance the more frequent word wins and ties fall back
/// to alphabetical order. The query itself is never suggested.
pub fn generate(
    word: &str,
    dictionary: &Dictionary,
    max_suggestions: usize,
) -> Result<Vec<String>> {
    if word.is_empty() || max_suggestions == 0 {
        return Ok(Vec::new());
    }

    let mut candidates: Vec<(usize, u64, String)> = dictionary
        .within_distance(word, MAX_DISTANCE)?
        .into_iter()
        .filter(|(candidate, _)| candidate != word)
        .map(|(candidate, freq)| (edit_distance(word, &candidate), freq, candidate))
        .collect();

    candidates.sort_by(|a, b| (a.0, Reverse(a.1), &a.2).cmp(&(b.0, Reverse(b.1), &b.2)));

    Ok(candidates
        .into_iter()
        .take(max_suggestions)
        .map(|(_, _, candidate)| candidate)
        .collect())
}

/// Optimal string alignment distance: Levenshtein plus swaps of two
/// adjacent characters, each counted as one edit.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut matrix = vec![vec![0; b_chars.len() + 1]; a_chars.len() + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a_chars.len() {
        for j in 1..=b_chars.len() {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            let mut best = (matrix[i - 1][j] + 1) // deletion
                .min(matrix[i][j - 1] + 1) // insertion
                .min(matrix[i - 1][j - 1] + cost); // substitution

            if i > 1
                && j > 1
                && a_chars[i - 1] == b_chars[j - 2]
                && a_chars[i - 2] == b_chars[j - 1]
            {
                best = best.min(matrix[i - 2][j - 2] + 1); // transposition
            }
            matrix[i][j] = best;
        }
    }

    matrix[a_chars.len()][b_chars.len()]
}

/// Match the capitalization of `original` on a lowercase suggestion.
pub fn match_case(original: &str, suggestion: &str) -> String {
    let mut chars = original.chars();
    let first_upper = chars.next().is_some_and(char::is_uppercase);
    let rest_upper = original.chars().count() > 1 && chars.all(|c| !c.is_lowercase());

    if first_upper && rest_upper {
        suggestion.to_uppercase()
    } else if first_upper {
        let mut out = String::with_capacity(suggestion.len());
        let mut rest = suggestion.chars();
        if let Some(first) = rest.next() {
            out.extend(first.to_uppercase());
        }
        out.extend(rest);
        out
    } else {
        suggestion.to_string()
    }
}
