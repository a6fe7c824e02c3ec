mod catalog;
mod order_file;
mod prefs;
mod session;
mod sink;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use iwv_core::{AppConfig, SortColumn};
use tracing_subscriber::EnvFilter;

use crate::prefs::{CacheCommands, ThemeArg};

#[derive(Debug, Parser)]
#[command(name = "iwv-cli")]
#[command(about = "IWV product catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the product table
    List {
        /// Only show products whose name contains this text
        #[arg(long)]
        search: Option<String>,
        /// Sort column: name, unit, price or indent
        #[arg(long)]
        sort: Option<SortColumn>,
        /// Sort descending instead of ascending
        #[arg(long, requires = "sort")]
        desc: bool,
        /// Ignore the cached product list and fetch again
        #[arg(long)]
        refresh: bool,
    },
    /// Render the print-ready catalogue
    Print {
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        refresh: bool,
    },
    /// Build the order summary from a YAML order file
    Summary {
        /// Order file with `items: [{name, quantity}]`
        #[arg(long)]
        order: PathBuf,
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        refresh: bool,
    },
    /// Interactive shopping session on stdin
    Shop {
        /// Write order summaries to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        refresh: bool,
    },
    /// Show or change the persisted theme
    Theme {
        #[arg(value_enum)]
        value: Option<ThemeArg>,
    },
    /// Print the contact link
    Contact,
    /// Manage the local product cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Local settings first: theme, contact and cache never need the product source.
    let local = iwv_core::load_local_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(local.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::List {
            search,
            sort,
            desc,
            refresh,
        }) => catalog::run_list(&source_config()?, search, sort, desc, refresh).await?,
        Some(Commands::Print { out, refresh }) => {
            catalog::run_print(&source_config()?, out, refresh).await?;
        }
        Some(Commands::Summary {
            order,
            out,
            refresh,
        }) => order_file::run_summary(&source_config()?, &order, out, refresh).await?,
        Some(Commands::Shop { out, refresh }) => {
            session::run_shop(&source_config()?, out, refresh).await?;
        }
        Some(Commands::Theme { value }) => prefs::run_theme(&local, value)?,
        Some(Commands::Contact) => prefs::run_contact(&local),
        Some(Commands::Cache { command }) => match command {
            CacheCommands::Clear => prefs::run_cache_clear(&local)?,
        },
        None => Cli::command().print_help()?,
    }

    Ok(())
}

/// Full configuration for commands that load the product list.
fn source_config() -> anyhow::Result<AppConfig> {
    let config = iwv_core::load_app_config_from_env()?;
    tracing::debug!(env = %config.local.env, source = config.source.kind(), "configuration loaded");
    Ok(config)
}
