//! Lugat CLI
//!
//! Command-line and terminal interface for Lugat - dictionary lookup history.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use lugat_core::{Config, NavigationGate, Store};

mod browser;
mod commands;
mod editor;
mod logging;
mod output;
mod shortcut;
mod tui;

use browser::SystemBrowser;
use commands::entry::NoteInput;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "lugat")]
#[command(about = "Lugat - lookup history for the lugatim.com dictionary")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use a specific config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// Look up a word and record it
    Lookup {
        /// Word to look up
        word: String,
        /// Record without opening the browser
        #[arg(long)]
        no_open: bool,
    },
    /// Record a page the browser navigated to
    Record {
        /// Navigation URL
        url: String,
    },
    /// Open the dictionary home page
    Random,
    /// List lookup history
    #[command(alias = "ls")]
    History {
        /// Only favorites
        #[arg(short, long)]
        favorites: bool,
    },
    /// List favorites
    Favorites,
    /// Show entry details (including note)
    Show {
        /// Entry: full UUID, ID prefix, or word
        entry: String,
    },
    /// Open an entry in the browser without recording it again
    Open {
        /// Entry: full UUID, ID prefix, or word
        entry: String,
    },
    /// Toggle favorite on an entry
    Star {
        /// Entry: full UUID, ID prefix, or word
        entry: String,
    },
    /// Set the note on an entry (opens editor if no text is given)
    Note {
        /// Entry: full UUID, ID prefix, or word
        entry: String,
        /// Note text
        #[arg(short, long, conflicts_with = "clear")]
        text: Option<String>,
        /// Remove the note
        #[arg(long)]
        clear: bool,
    },
    /// Delete an entry
    #[command(alias = "rm")]
    Delete {
        /// Entry: full UUID, ID prefix, or word
        entry: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show status (storage location, counts)
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Create the desktop launcher
    Shortcut,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, data_file, site_url, lookup_path, log_file, desktop_shortcut)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Handle TUI (default when no command given)
    let command = match cli.command {
        None | Some(Commands::Tui) => return tui::run(config_path),
        Some(command) => command,
    };

    logging::init_cli_logging();

    // Commands that don't need the store
    match &command {
        Commands::Config { command } => {
            return handle_config_command(command.clone(), config_path, &output);
        }
        Commands::Shortcut => return handle_shortcut_command(&output),
        _ => {}
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    let mut gate = NavigationGate::from_config(&config);
    let mut store = Store::open_with_config(config);
    let mut browser = SystemBrowser;

    if let Some(warning) = store.load_warning() {
        output.warning(&warning.to_string());
    }

    match command {
        Commands::Lookup { word, no_open } => commands::lookup::lookup(
            &mut store,
            &mut gate,
            &mut browser,
            &word,
            no_open,
            &output,
        ),
        Commands::Record { url } => commands::lookup::record(&mut store, &mut gate, &url, &output),
        Commands::Random => commands::lookup::random(&mut store, &mut gate, &mut browser, &output),
        Commands::History { favorites } => commands::history::list(&store, favorites, &output),
        Commands::Favorites => commands::history::list(&store, true, &output),
        Commands::Show { entry } => commands::entry::show(&store, &entry, &output),
        Commands::Open { entry } => {
            commands::entry::open(&mut store, &mut gate, &mut browser, &entry, &output)
        }
        Commands::Star { entry } => commands::entry::star(&mut store, &entry, &output),
        Commands::Note { entry, text, clear } => {
            let input = match (text, clear) {
                (Some(text), _) => NoteInput::Text(text),
                (None, true) => NoteInput::Clear,
                (None, false) => NoteInput::Editor,
            };
            commands::entry::note(&mut store, &entry, input, &output)
        }
        Commands::Delete { entry, yes } => {
            commands::entry::delete(&mut store, &entry, yes, &output)
        }
        Commands::Status => commands::status::show(&store, &output),
        Commands::Tui | Commands::Config { .. } | Commands::Shortcut => Ok(()), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

fn handle_shortcut_command(output: &Output) -> Result<()> {
    match shortcut::ensure_desktop_shortcut()? {
        Some(path) => output.success(&format!("Created {}", path.display())),
        None => output.message("Desktop shortcut already exists or is not supported here."),
    }
    Ok(())
}
