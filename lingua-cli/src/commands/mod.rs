//! Subcommand implementations.

pub mod build;
pub mod diff;
pub mod export;
pub mod init;
pub mod list;

use std::path::PathBuf;

use anyhow::{Context, Result};

use lingua_core::catalog;

/// Catalog root: the `--root` flag when given, `~/.lingua` otherwise.
pub(crate) fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(root) => Ok(root),
        None => catalog::default_root().context("could not determine home directory"),
    }
}
