use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use livespell::checker::{SpellChecker, Speller, Unavailable};
use livespell::cli::output::{print_notice, print_report, OutputFormat};
use livespell::config::Overrides;
use livespell::{cli, Config, Document, Editor};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "livespell")]
#[command(version, about = "Underline misspelled words and suggest corrections", long_about = None)]
struct Cli {
    /// File to check (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Correct words interactively from suggestion menus
    #[arg(short, long)]
    interactive: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Language of the installed dictionary (e.g., en_US, en_GB)
    #[arg(short, long)]
    language: Option<String>,

    /// Dictionary file: a prebuilt .dict or a plain word list
    #[arg(short, long, value_name = "PATH")]
    dict: Option<PathBuf>,

    /// Extra known words, one per line
    #[arg(long, value_name = "PATH")]
    personal_dict: Option<PathBuf>,

    /// Candidates to request per misspelling (menus show at most 7)
    #[arg(long, value_name = "N")]
    max_suggestions: Option<usize>,

    /// Config file to use instead of ./.livespell.toml
    #[arg(long, value_name = "PATH", env = "LIVESPELL_CONFIG")]
    config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DictCommands {
    /// Compile a word list ("word [frequency]" per line) into a .dict file
    Build {
        /// Word list to compile
        #[arg(value_name = "WORDLIST")]
        wordlist: PathBuf,

        /// Output path (defaults to the installed dictionary for the language)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Show dictionary info
    Info {
        /// Dictionary file (defaults to the installed one for the language)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "livespell", &mut io::stdout());
        return Ok(());
    }

    let colored_output = !cli.no_color && cli.format == OutputFormat::Text;
    if !colored_output {
        colored::control::set_override(false);
    }

    let config = Config::load(Overrides {
        config_file: cli.config.clone(),
        language: cli.language.clone(),
        dictionary: cli.dict.clone(),
        personal_dictionary: cli.personal_dict.clone(),
        max_suggestions: cli.max_suggestions,
    })?;

    if let Some(command) = cli.command {
        return handle_command(command, &config);
    }

    let text = match &cli.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?,
        None => {
            if cli.interactive && io::stdin().is_terminal() {
                String::new()
            } else {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read stdin")?;
                buf
            }
        }
    };

    // A missing dictionary degrades to unmarked text, not a crash.
    let speller: Box<dyn Speller> = match SpellChecker::new(&config) {
        Ok(checker) => Box::new(checker),
        Err(err) => {
            tracing::warn!(error = %format!("{:#}", err), "dictionary could not be loaded");
            Box::new(Unavailable::new(format!("{:#}", err)))
        }
    };

    let mut editor =
        Editor::new(Document::new(&text), speller).with_max_suggestions(config.max_suggestions);

    if cli.interactive {
        return cli::interactive::run(&mut editor, cli.file.as_deref(), colored_output);
    }

    let delta = editor.on_key_release();
    let report = cli::build_report(&mut editor, &delta);
    for notice in editor.take_notices() {
        print_notice(&notice.message, colored_output);
    }
    print_report(&text, &report, colored_output, cli.format)?;

    Ok(())
}

fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Dict { action } => match action {
            DictCommands::Build { wordlist, output } => {
                let output = match output {
                    Some(path) => path,
                    None => cli::dict::installed_path(&config.language)?,
                };
                cli::dict::build_dictionary(&wordlist, &output, !config.case_sensitive)?;
            }
            DictCommands::Info { path } => {
                let path = match path {
                    Some(path) => path,
                    None => cli::dict::installed_path(&config.language)?,
                };
                cli::dict::show_info(&path)?;
            }
        },
    }
    Ok(())
}
