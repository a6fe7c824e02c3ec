//! Product loading and the read-only `list` / `print` commands.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use iwv_core::print::render_print_document;
use iwv_core::render::format_table;
use iwv_core::{AppConfig, CatalogMessage, CatalogState, LocalConfig, Product, SortColumn};
use iwv_source::{load_products, CatalogClient, LocalStore, ProductCache, LOAD_FAILED_MESSAGE};

use crate::sink::Sink;

pub(crate) fn local_store(config: &LocalConfig) -> LocalStore {
    LocalStore::new(config.store_path.clone())
}

pub(crate) fn product_cache(config: &LocalConfig) -> ProductCache {
    ProductCache::new(
        local_store(config),
        Duration::from_secs(config.cache_ttl_secs),
    )
}

/// Loads products from the cache or the configured source.
///
/// # Errors
///
/// Returns an error carrying the user-facing load failure message, with the
/// underlying source error as its cause.
pub(crate) async fn fetch_catalog(
    config: &AppConfig,
    refresh: bool,
) -> anyhow::Result<Vec<Product>> {
    let client = CatalogClient::from_config(config)?;
    let cache = product_cache(&config.local);
    load_products(&client, &cache, refresh)
        .await
        .context(LOAD_FAILED_MESSAGE)
}

/// Show the product table, optionally filtered and sorted.
///
/// # Errors
///
/// Returns an error if the product list cannot be loaded.
pub(crate) async fn run_list(
    config: &AppConfig,
    search: Option<String>,
    sort: Option<SortColumn>,
    descending: bool,
    refresh: bool,
) -> anyhow::Result<()> {
    let products = fetch_catalog(config, refresh).await?;
    let mut state = CatalogState::new(products);

    if let Some(term) = search {
        state.apply(CatalogMessage::Search(term))?;
    }
    if let Some(column) = sort {
        state.apply(CatalogMessage::SortBy(column))?;
        if descending {
            state.apply(CatalogMessage::SortBy(column))?;
        }
    }

    print!("{}", format_table(&state.render()));
    Ok(())
}

/// Render the full catalogue for printing.
///
/// # Errors
///
/// Returns an error if the product list cannot be loaded or the output
/// cannot be written.
pub(crate) async fn run_print(
    config: &AppConfig,
    out: Option<PathBuf>,
    refresh: bool,
) -> anyhow::Result<()> {
    let products = fetch_catalog(config, refresh).await?;
    let document = render_print_document(&products, Utc::now());
    let sink = Sink::from_arg(out);
    sink.deliver(&document.text())
        .with_context(|| format!("could not write print document to {sink}"))?;
    Ok(())
}
