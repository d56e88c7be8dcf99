// Terminal stand-in for the editor widget: picking a misspelling plays the
// role of a right-click, typing a line plays the role of a key release.

use crate::checker::Speller;
use crate::cli::output::{line_col, print_notice, print_status, render_highlighted};
use crate::editor::Editor;
use crate::menu::MenuItem;
use crate::surface::{Document, TextSurface};
use crate::Span;
use anyhow::{Context, Result};
use colored::*;
use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use std::fs;
use std::path::Path;

enum Action {
    Correct(Span),
    Type,
    Quit,
}

pub fn run<P: Speller>(
    editor: &mut Editor<Document, P>,
    path: Option<&Path>,
    colored_output: bool,
) -> Result<()> {
    let theme = ColorfulTheme::default();
    let term = Term::stdout();
    let original = editor.surface().text();

    editor.on_key_release();

    loop {
        term.clear_screen()?;
        show(editor, colored_output);

        match choose_action(editor, &theme)? {
            Action::Correct(span) => correct(editor, span, &theme)?,
            Action::Type => {
                let line: String = Input::with_theme(&theme)
                    .with_prompt("Type")
                    .allow_empty(true)
                    .interact_text()?;
                let end = editor.surface().len();
                let text = if end == 0 { line } else { format!("\n{}", line) };
                editor.edit(Span::new(end, end), &text)?;
                editor.on_key_release();
            }
            Action::Quit => {
                let quit = Confirm::with_theme(&theme)
                    .with_prompt("Do you want to quit?")
                    .default(true)
                    .interact()?;
                if quit {
                    break;
                }
            }
        }
    }

    let text = editor.surface().text();
    if let Some(path) = path {
        if text != original {
            let save = Confirm::with_theme(&theme)
                .with_prompt(format!("Save changes to {}?", path.display()))
                .default(true)
                .interact()?;
            if save {
                fs::write(path, &text)
                    .with_context(|| format!("Failed to write file: {}", path.display()))?;
            }
        }
    }

    Ok(())
}

fn show<P: Speller>(editor: &mut Editor<Document, P>, colored_output: bool) {
    let text = editor.surface().text();
    let spans: Vec<Span> = editor.surface().tags().collect();
    println!("{}", render_highlighted(&text, &spans, colored_output));

    for notice in editor.take_notices() {
        print_notice(&notice.message, colored_output);
    }
    print_status(editor.status(), colored_output);
    println!();
}

fn choose_action<P: Speller>(
    editor: &Editor<Document, P>,
    theme: &ColorfulTheme,
) -> Result<Action> {
    let text = editor.surface().text();
    let spans: Vec<Span> = editor.reconciler().active().collect();

    let mut labels: Vec<String> = spans
        .iter()
        .map(|span| {
            let (line, column) = line_col(&text, span.start);
            format!("{} ({}:{})", &text[span.start..span.end], line, column)
        })
        .collect();
    labels.push("Type a line".to_string());
    labels.push("Quit".to_string());

    let choice = Select::with_theme(theme)
        .with_prompt("Pick a misspelling")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(match choice {
        i if i < spans.len() => Action::Correct(spans[i]),
        i if i == spans.len() => Action::Type,
        _ => Action::Quit,
    })
}

fn correct<P: Speller>(
    editor: &mut Editor<Document, P>,
    span: Span,
    theme: &ColorfulTheme,
) -> Result<()> {
    let Some(menu) = editor.on_right_click(span.start) else {
        return Ok(());
    };

    // Separators and placeholders are shown but cannot be picked.
    let entries: Vec<&MenuItem> = menu.items.iter().filter(|item| item.is_selectable()).collect();
    let mut labels: Vec<String> = entries.iter().map(|item| item.label().to_string()).collect();
    if menu.suggestions().is_empty() {
        labels.insert(0, "No suggestions".dimmed().to_string());
    }
    labels.push("Cancel".to_string());

    let offset = usize::from(menu.suggestions().is_empty());
    let choice = Select::with_theme(theme)
        .with_prompt(format!("Replace '{}'", menu.target.word))
        .items(&labels)
        .default(offset)
        .interact()?;

    if choice < offset {
        return Ok(());
    }
    if let Some(item) = entries.get(choice - offset) {
        editor.on_menu_select(&menu, item);
    }
    Ok(())
}
