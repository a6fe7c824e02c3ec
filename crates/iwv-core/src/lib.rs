pub mod app_config;
pub mod config;
pub mod error;
pub mod price;
pub mod print;
pub mod product;
pub mod quantity;
pub mod reconcile;
pub mod render;
pub mod selection;
pub mod state;
pub mod summary;
pub mod theme;
pub mod view;

pub use app_config::{AppConfig, Environment, LocalConfig, SourceConfig};
pub use config::{load_app_config, load_app_config_from_env, load_local_config};
pub use error::{ConfigError, CoreError, SummaryError};
pub use product::{Product, WEIGHED_UNIT};
pub use quantity::{Quantity, QuantityRule};
pub use reconcile::{apply_edit, reconcile, RowEdit, RowState};
pub use render::{render, RenderedTable, RowView};
pub use selection::{SelectionEntry, SelectionMap};
pub use state::{CatalogMessage, CatalogState};
pub use summary::{build_summary, OrderLine, OrderSummary, PricingPolicy};
pub use theme::Theme;
pub use view::{compute_display_list, SortColumn, SortState};
