//! Error types for lingua-site.

use std::path::PathBuf;

use thiserror::Error;

use lingua_core::error::CatalogError;
use lingua_export::ExportError;
use lingua_pages::PageError;

/// All errors that can arise from site build operations.
#[derive(Debug, Error)]
pub enum SiteError {
    /// An error from the page rendering engine.
    #[error("page error: {0}")]
    Page(#[from] PageError),

    /// An error from the project catalog.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// An error from the data-export builders.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error (hash store).
    #[error("hash store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience constructor for [`SiteError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SiteError {
    SiteError::Io {
        path: path.into(),
        source,
    }
}
