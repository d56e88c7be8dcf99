use crate::checker::dictionary::{parse_word_list, Dictionary};
use crate::Config;
use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Where `dict build` writes when no output path is given.
pub fn installed_path(language: &str) -> Result<PathBuf> {
    let data_dir = Config::data_dir().context("Failed to get data directory")?;
    Ok(data_dir.join(format!("{}.dict", language)))
}

/// Compile a `word [frequency]` list into an FST dictionary at `output`.
pub fn build_dictionary(wordlist: &Path, output: &Path, fold_case: bool) -> Result<usize> {
    let contents = fs::read_to_string(wordlist)
        .with_context(|| format!("Failed to read word list: {}", wordlist.display()))?;

    println!("{}", "Building dictionary...".cyan());
    let entries = parse_word_list(&contents, fold_case);
    if entries.is_empty() {
        anyhow::bail!("No words found in {}", wordlist.display());
    }
    println!("Found {} words", entries.len().to_string().yellow());

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Dictionary::build_from_entries(entries, output)?;

    let dictionary = Dictionary::load_from_path(output, fold_case)?;
    tracing::debug!(path = %output.display(), words = dictionary.len(), "dictionary built");

    println!(
        "{} Dictionary installed: {}",
        "✓".green().bold(),
        output.display().to_string().cyan()
    );

    Ok(dictionary.len())
}

pub fn show_info(path: &Path) -> Result<()> {
    if !path.exists() {
        println!(
            "{} Dictionary not found: {}",
            "✗".red().bold(),
            path.display().to_string().yellow()
        );
        println!("Run {} to build it.", "livespell dict build <WORDLIST>".cyan());
        return Ok(());
    }

    let metadata = fs::metadata(path)?;
    let dictionary = Dictionary::load_from_path(path, true)?;

    println!("{}", format!("Dictionary: {}", path.display()).bold());
    println!("  Size: {} KB", metadata.len() / 1024);
    println!("  Words: {}", dictionary.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_build_dictionary() {
        let dir = tempdir().unwrap();
        let wordlist = dir.path().join("words.txt");
        fs::write(&wordlist, "the 100\nten 20\nThe 5\n").unwrap();
        let output = dir.path().join("nested").join("en.dict");

        assert_eq!(build_dictionary(&wordlist, &output, true).unwrap(), 2);

        let dictionary = Dictionary::load_from_path(&output, true).unwrap();
        assert_eq!(dictionary.frequency("the"), Some(100));
        assert!(dictionary.contains("ten"));
    }

    #[test]
    fn test_build_rejects_empty_list() {
        let dir = tempdir().unwrap();
        let wordlist = dir.path().join("words.txt");
        fs::write(&wordlist, "# nothing here\n").unwrap();

        assert!(build_dictionary(&wordlist, &dir.path().join("en.dict"), true).is_err());
        assert!(!dir.path().join("en.dict").exists());
    }
}
