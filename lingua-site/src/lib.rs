//! # lingua-site
//!
//! Static-site build pipeline: renders the dashboard pages from the
//! catalog, writes them through a hash-gated atomic writer, and supports
//! dry-run unified diffs against the on-disk site.
//!
//! - [`pipeline::run`] — build (or dry-run) a scope of the site
//! - [`diff_site`] — unified diff of what a build would change
//! - [`hash_store`] — `<root>/state/site.json` idempotency tracking

pub mod diff;
pub mod error;
pub mod hash_store;
pub mod pipeline;
pub mod writer;

pub use diff::{diff_site, DiffResult, FileDiff};
pub use error::SiteError;
pub use pipeline::{BuildOptions, BuildResult, BuildScope, RenderedFile};
pub use writer::WriteResult;
