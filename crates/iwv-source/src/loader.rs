use chrono::Utc;
use iwv_core::Product;

use crate::cache::ProductCache;
use crate::client::CatalogClient;
use crate::error::SourceError;

/// Returns the product list, preferring a fresh cache entry over the network.
///
/// With `refresh` set the cache is bypassed. A successful fetch is written
/// back to the cache; failing to write it is logged and does not fail the
/// load.
///
/// # Errors
///
/// Returns the [`SourceError`] from [`CatalogClient::fetch_products`] when
/// the cache misses and the fetch fails.
pub async fn load_products(
    client: &CatalogClient,
    cache: &ProductCache,
    refresh: bool,
) -> Result<Vec<Product>, SourceError> {
    if !refresh {
        if let Some(products) = cache.load_fresh(Utc::now()) {
            return Ok(products);
        }
    }

    let source = client.source().kind();
    let products = client.fetch_products().await.inspect_err(|e| {
        tracing::error!(source, error = %e, "failed to load products");
    })?;
    tracing::info!(source, count = products.len(), "products loaded");

    if let Err(e) = cache.save(Utc::now(), &products) {
        tracing::warn!(error = %e, "could not write product cache");
    }
    Ok(products)
}
