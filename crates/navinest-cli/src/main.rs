//! NaviNest CLI
//!
//! Command-line interface for NaviNest - a personal bookmark dashboard.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use navinest_core::{Config, DashboardStore};

mod commands;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "navinest")]
#[command(about = "NaviNest - personal bookmark dashboard")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage categories
    #[command(alias = "cat")]
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Manage links
    Link {
        #[command(subcommand)]
        command: LinkCommands,
    },
    /// Toggle or list favorites
    Fav {
        #[command(subcommand)]
        command: FavCommands,
    },
    /// Import a dashboard document from a JSON file
    Import {
        /// Path to the JSON file
        file: PathBuf,
        /// Append to the current dashboard instead of replacing it
        #[arg(long)]
        merge: bool,
    },
    /// Export the dashboard as clean, re-importable JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Reset the dashboard to the bundled default
    Reset,
    /// Show status (storage location, counts)
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Manage the chat API key
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },
    /// Ask the configured chat model
    Chat {
        /// The prompt to send
        prompt: Vec<String>,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// Create a new category
    #[command(alias = "create")]
    Add {
        /// Display name
        name: String,
        /// Icon name
        #[arg(short, long, default_value = "Folder")]
        icon: String,
    },
    /// List all categories and their links
    #[command(alias = "ls")]
    List,
    /// Edit a category's name and icon
    Edit {
        /// Category id (full, prefix, or exact name)
        id: String,
    },
    /// Delete a category and all its links
    #[command(alias = "rm")]
    Delete {
        /// Category id (full, prefix, or exact name)
        id: String,
    },
    /// Move a category to a new position (0-based)
    Move {
        /// Category id (full, prefix, or exact name)
        id: String,
        /// Target position
        position: usize,
    },
}

#[derive(Subcommand)]
enum LinkCommands {
    /// Create a new link inside a category
    #[command(alias = "create")]
    Add {
        /// Category (id, prefix, or exact name)
        category: String,
        /// Display name
        name: String,
        /// The URL
        url: String,
        /// Icon name
        #[arg(short, long)]
        icon: Option<String>,
        /// Short description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List links, all or one category's
    #[command(alias = "ls")]
    List {
        /// Limit to one category (id, prefix, or exact name)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show link details
    Show {
        /// Link id (full or prefix)
        id: String,
    },
    /// Edit a link
    Edit {
        /// Link id (full or prefix)
        id: String,
    },
    /// Delete a link
    #[command(alias = "rm")]
    Delete {
        /// Link id (full or prefix)
        id: String,
    },
    /// Open a link's URL in the browser
    Open {
        /// Link id (full or prefix)
        id: String,
    },
    /// Move a link to a new position within its category (0-based)
    Move {
        /// Link id (full or prefix)
        id: String,
        /// Target position
        position: usize,
    },
}

#[derive(Subcommand)]
enum FavCommands {
    /// Toggle a link in the favorites list
    Toggle {
        /// Link id (full or prefix)
        id: String,
    },
    /// List favorite links
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, chat_url, chat_model, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[derive(Subcommand)]
enum KeyCommands {
    /// Store the chat API key
    Set {
        /// The key
        key: String,
    },
    /// Show whether a key is stored
    Show,
    /// Remove the stored key
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    init_logging();

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), &output);
    }

    let config = Config::load()?;
    let mut store = DashboardStore::open(config)?;

    match cli.command {
        Commands::Category { command } => handle_category_command(command, &mut store, &output),
        Commands::Link { command } => handle_link_command(command, &mut store, &output),
        Commands::Fav { command } => match command {
            FavCommands::Toggle { id } => commands::favorite::toggle(&mut store, id, &output),
            FavCommands::List => commands::favorite::list(&store, &output),
        },
        Commands::Import { file, merge } => {
            commands::transfer::import_file(&mut store, file, merge, &output)
        }
        Commands::Export { output: file } => commands::transfer::export_doc(&store, file, &output),
        Commands::Reset => commands::transfer::reset(&mut store, &output),
        Commands::Status => commands::status::show(&store, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Key { command } => match command {
            KeyCommands::Set { key } => commands::key::set(&store, key, &output),
            KeyCommands::Show => commands::key::show(&store, &output),
            KeyCommands::Clear => commands::key::clear(&store, &output),
        },
        Commands::Chat { prompt } => commands::chat::send(&store, prompt.join(" ")).await,
    }
}

fn handle_category_command(
    command: CategoryCommands,
    store: &mut DashboardStore,
    output: &Output,
) -> Result<()> {
    match command {
        CategoryCommands::Add { name, icon } => commands::category::add(store, name, icon, output),
        CategoryCommands::List => commands::category::list(store, output),
        CategoryCommands::Edit { id } => commands::category::edit(store, id, output),
        CategoryCommands::Delete { id } => commands::category::delete(store, id, output),
        CategoryCommands::Move { id, position } => {
            commands::category::move_to(store, id, position, output)
        }
    }
}

fn handle_link_command(
    command: LinkCommands,
    store: &mut DashboardStore,
    output: &Output,
) -> Result<()> {
    match command {
        LinkCommands::Add {
            category,
            name,
            url,
            icon,
            description,
        } => commands::link::add(store, category, name, url, icon, description, output),
        LinkCommands::List { category } => commands::link::list(store, category, output),
        LinkCommands::Show { id } => commands::link::show(store, id, output),
        LinkCommands::Edit { id } => commands::link::edit(store, id, output),
        LinkCommands::Delete { id } => commands::link::delete(store, id, output),
        LinkCommands::Open { id } => commands::link::open_url(store, id, output),
        LinkCommands::Move { id, position } => commands::link::move_to(store, id, position, output),
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}

/// Initialize logging to stderr
///
/// Level comes from NAVINEST_LOG (default: warn). Store persistence
/// failures surface here as warnings.
fn init_logging() {
    let env_filter =
        EnvFilter::try_from_env("NAVINEST_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
