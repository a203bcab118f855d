use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while exporting recipe packs
#[derive(Error, Debug)]
pub enum ExportError {
    /// Login was rejected or the login call failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailure(String),

    /// Transport error, timeout or non-2xx response on an API or image call
    #[error("Request failed while trying to {operation}: {source}")]
    Network {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    /// A recipe could not be serialized or compressed
    #[error("Failed to encode recipe `{recipe}`: {message}")]
    Encoding { recipe: String, message: String },

    /// The archive container or one of its entries could not be written
    #[error("Archive error: {0}")]
    Archive(String),

    /// The destination could not be created or written
    #[error("Filesystem error at {path}: {source}", path = .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No exporter exists for the requested format
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    Builder(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ExportError {
    pub(crate) fn network(operation: impl Into<String>, source: reqwest::Error) -> Self {
        ExportError::Network {
            operation: operation.into(),
            source,
        }
    }
}
