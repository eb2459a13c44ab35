//! Error types for lingua-pages.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from page rendering operations.
#[derive(Debug, Error)]
pub enum PageError {
    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// JSON serialization error (building tera context).
    #[error("context serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error while loading user templates or message catalogs.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    /// Malformed message catalog YAML.
    #[error("failed to parse message catalog at {path}: {source}")]
    MessageCatalog {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
