use thiserror::Error;

/// Generic message shown to the user whenever the product list cannot be
/// loaded, whatever the underlying cause.
pub const LOAD_FAILED_MESSAGE: &str = "Error loading data. Please try again later.";

/// Errors returned while fetching or decoding the product list.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The source answered but held no product rows.
    #[error("no product data found in {context}")]
    EmptyData { context: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid source URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Errors from the local key/value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("store at {path} is not valid JSON: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("value for key {key} could not be encoded or decoded: {source}")]
    Value {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
