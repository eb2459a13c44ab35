//! Hash store — SHA-256-based idempotency tracking for built pages.
//!
//! Persists a `HashStoreFile` JSON document at `<root>/state/site.json`.
//! Writes use the same atomic `.tmp` + rename pattern as the catalog.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{io_err, SiteError};

/// In-memory hash store: maps output file path strings to their last built
/// SHA-256 hex digest.
pub type HashStore = HashMap<String, String>;

/// On-disk hash store payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HashStoreFile {
    pub synced_at: DateTime<Utc>,
    pub files: HashStore,
}

/// Path to the site hash store JSON, rooted at the catalog root.
///
/// `<root>/state/site.json`
pub fn store_path_at(root: &Path) -> PathBuf {
    root.join("state").join("site.json")
}

/// Load the site hash store.
///
/// Returns an empty store if the file does not yet exist.
pub fn load_at(root: &Path) -> Result<HashStoreFile, SiteError> {
    let path = store_path_at(root);
    if !path.exists() {
        return Ok(HashStoreFile {
            synced_at: Utc::now(),
            files: HashMap::new(),
        });
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    let store: HashStoreFile = serde_json::from_str(&contents)?;
    Ok(store)
}

/// Save the site hash store atomically.
///
/// Writes to `<path>.tmp` then renames to `<path>`.
pub fn save_at(root: &Path, store: &HashStoreFile) -> Result<(), SiteError> {
    let path = store_path_at(root);
    let Some(dir) = path.parent() else {
        return Err(io_err(
            path,
            std::io::Error::other("invalid hash store path"),
        ));
    };

    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    let json = serde_json::to_string_pretty(store)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &json).map_err(|e| io_err(&tmp, e))?;
    std::fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))?;
    Ok(())
}
