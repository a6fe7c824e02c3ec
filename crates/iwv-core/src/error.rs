use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown product: {0}")]
    UnknownProduct(String),

    #[error("unknown sort column: {0}")]
    UnknownSortColumn(String),

    #[error("unknown theme: {0}")]
    UnknownTheme(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummaryError {
    /// The selection map is empty; there is no order to summarise.
    #[error("no products selected")]
    NothingSelected,

    #[error("order amount for {product_name} is too large to compute")]
    AmountTooLarge { product_name: String },

    #[error("order total is too large to compute")]
    TotalTooLarge,
}
