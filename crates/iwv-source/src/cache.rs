//! Time-boxed cache of the last successfully loaded product list.

use std::time::Duration;

use chrono::{DateTime, Utc};
use iwv_core::Product;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::LocalStore;

/// Store key holding the cached product list.
pub const PRODUCTS_CACHE_KEY: &str = "iwvProductsCache";

/// Products plus the moment they were fetched, in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedProducts {
    pub timestamp: i64,
    pub data: Vec<Product>,
}

impl CachedProducts {
    /// Age relative to `now`. A timestamp in the future counts as age zero.
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        let millis = now.timestamp_millis().saturating_sub(self.timestamp);
        Duration::from_millis(u64::try_from(millis).unwrap_or(0))
    }
}

pub struct ProductCache {
    store: LocalStore,
    ttl: Duration,
}

impl ProductCache {
    #[must_use]
    pub fn new(store: LocalStore, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached products if present and younger than the TTL.
    ///
    /// A cache entry that cannot be read is treated as a miss.
    #[must_use]
    pub fn load_fresh(&self, now: DateTime<Utc>) -> Option<Vec<Product>> {
        let cached = match self.store.get::<CachedProducts>(PRODUCTS_CACHE_KEY) {
            Ok(Some(cached)) => cached,
            Ok(None) => {
                tracing::debug!("product cache empty");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "product cache unreadable, ignoring");
                return None;
            }
        };
        let age = cached.age(now);
        if age >= self.ttl {
            tracing::debug!(age_secs = age.as_secs(), "product cache stale");
            return None;
        }
        tracing::debug!(
            age_secs = age.as_secs(),
            count = cached.data.len(),
            "product cache hit"
        );
        Some(cached.data)
    }

    /// Stores `products` stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be written.
    pub fn save(&self, now: DateTime<Utc>, products: &[Product]) -> Result<(), StoreError> {
        let entry = CachedProducts {
            timestamp: now.timestamp_millis(),
            data: products.to_vec(),
        };
        self.store.set(PRODUCTS_CACHE_KEY, &entry)
    }

    /// Drops the cached list. Returns `true` if one was present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be rewritten.
    pub fn clear(&self) -> Result<bool, StoreError> {
        self.store.remove(PRODUCTS_CACHE_KEY)
    }
}
