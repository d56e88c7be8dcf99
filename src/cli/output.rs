use crate::Span;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Misspelling {
    pub word: String,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub words: usize,
    pub errors: usize,
    pub misspellings: Vec<Misspelling>,
}

/// 1-based line and column (in chars) of a byte offset.
pub fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset.min(text.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// The text with every span underlined in red.
pub fn render_highlighted(text: &str, spans: &[Span], colored_output: bool) -> String {
    if !colored_output {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in spans {
        if !span.fits(text) || span.start < cursor {
            continue;
        }
        out.push_str(&text[cursor..span.start]);
        out.push_str(&text[span.start..span.end].red().underline().to_string());
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}

pub fn print_report(
    text: &str,
    report: &Report,
    colored_output: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print_text_report(text, report, colored_output),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

fn print_text_report(text: &str, report: &Report, colored_output: bool) {
    let spans: Vec<Span> = report
        .misspellings
        .iter()
        .map(|m| Span::new(m.start, m.end))
        .collect();

    println!("{}", render_highlighted(text, &spans, colored_output));

    if !report.misspellings.is_empty() {
        println!();
    }

    for misspelling in &report.misspellings {
        let line_info = format!("{}:{}", misspelling.line, misspelling.column);
        let suggestions = if misspelling.suggestions.is_empty() {
            "No suggestions".to_string()
        } else {
            misspelling.suggestions.join(", ")
        };

        if colored_output {
            println!(
                "  {} {} {} {}",
                line_info.blue().bold(),
                misspelling.word.red().bold(),
                "→".dimmed(),
                suggestions.green()
            );
        } else {
            println!("  {} {} → {}", line_info, misspelling.word, suggestions);
        }
    }

    print_status(&status_line(report), colored_output);
}

pub fn status_line(report: &Report) -> String {
    format!("Words: {} | Errors Found: {}", report.words, report.errors)
}

pub fn print_status(status: &str, colored_output: bool) {
    println!();
    if colored_output {
        println!("{}", status.dimmed());
    } else {
        println!("{}", status);
    }
}

pub fn print_notice(message: &str, colored_output: bool) {
    if colored_output {
        eprintln!("{} {}", "!".yellow().bold(), message.yellow());
    } else {
        eprintln!("! {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let text = "first line\nsecönd teh";
        assert_eq!(line_col(text, 0), (1, 1));
        assert_eq!(line_col(text, 6), (1, 7));
        assert_eq!(line_col(text, 19), (2, 8));
    }

    #[test]
    fn test_plain_render_is_untouched() {
        let text = "Teh cat";
        assert_eq!(render_highlighted(text, &[Span::new(0, 3)], false), text);
    }

    #[test]
    fn test_colored_render_keeps_text() {
        colored::control::set_override(true);
        let rendered = render_highlighted("Teh cat", &[Span::new(0, 3)], true);
        colored::control::unset_override();
        assert!(rendered.contains("Teh"));
        assert!(rendered.ends_with(" cat"));
        assert_ne!(rendered, "Teh cat");
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
