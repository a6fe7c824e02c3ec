//! Local preference commands: theme, contact link, cache.

use clap::{Subcommand, ValueEnum};
use iwv_core::{LocalConfig, Theme};
use iwv_source::{load_theme, save_theme};

use crate::catalog::{local_store, product_cache};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
    Toggle,
}

impl ThemeArg {
    /// The theme to persist given the currently stored one.
    pub(crate) fn resolve(self, current: Theme) -> Theme {
        match self {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
            ThemeArg::Toggle => current.toggled(),
        }
    }
}

/// Sub-commands available under `cache`.
#[derive(Debug, Subcommand)]
pub enum CacheCommands {
    /// Drop the cached product list so the next load fetches again
    Clear,
}

/// Show the persisted theme, or change it when `value` is given.
///
/// # Errors
///
/// Returns an error if the new theme cannot be persisted.
pub(crate) fn run_theme(config: &LocalConfig, value: Option<ThemeArg>) -> anyhow::Result<()> {
    let store = local_store(config);
    let current = load_theme(&store);
    let Some(value) = value else {
        println!("theme: {current}");
        return Ok(());
    };

    let next = value.resolve(current);
    save_theme(&store, next)?;
    tracing::info!(from = %current, to = %next, "theme updated");
    println!("theme: {next}");
    Ok(())
}

pub(crate) fn run_contact(config: &LocalConfig) {
    println!("{}", config.contact_url);
}

/// # Errors
///
/// Returns an error if the local store cannot be rewritten.
pub(crate) fn run_cache_clear(config: &LocalConfig) -> anyhow::Result<()> {
    if product_cache(config).clear()? {
        println!("product cache cleared");
    } else {
        println!("product cache already empty");
    }
    Ok(())
}
