pub mod cache;
pub mod client;
pub mod error;
pub mod loader;
pub mod normalize;
pub(crate) mod retry;
pub mod store;
pub mod types;

pub use cache::{CachedProducts, ProductCache, PRODUCTS_CACHE_KEY};
pub use client::CatalogClient;
pub use error::{SourceError, StoreError, LOAD_FAILED_MESSAGE};
pub use loader::load_products;
pub use normalize::{products_from_json, products_from_sheet};
pub use store::{load_theme, save_theme, LocalStore};
