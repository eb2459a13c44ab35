//! Hash-gated atomic writer.
//!
//! ## `atomic_write` — write protocol
//!
//! 1. Normalise line endings to LF.
//! 2. SHA-256 hash the content.
//! 3. Compare with the stored hash → skip if identical.
//! 4. Write to `<path>.lingua.tmp`.
//! 5. Rename to final path (atomic on POSIX).
//! 6. Update hash store entry (caller saves the store).

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{io_err, SiteError};
use crate::hash_store::HashStore;

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of an individual file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped — rendered content matches the stored hash.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    /// The output path this result refers to.
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// atomic_write
// ---------------------------------------------------------------------------

/// Atomically write a single rendered file and update the hash store.
///
/// The hash store is loaded before the call; the caller is responsible for
/// saving it after all files for a build are processed.
///
/// Returns [`WriteResult`] indicating whether the file was written or skipped.
pub(crate) fn atomic_write(
    path: &Path,
    content: &str,
    hash_store: &mut HashStore,
    dry_run: bool,
) -> Result<WriteResult, SiteError> {
    let tmp = PathBuf::from(format!("{}.lingua.tmp", path.display()));
    atomic_write_with_tmp(path, content, hash_store, dry_run, &tmp)
}

fn atomic_write_with_tmp(
    path: &Path,
    content: &str,
    hash_store: &mut HashStore,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, SiteError> {
    // Normalise line endings to LF before hashing and writing.
    let normalized = content.replace("\r\n", "\n");
    let content = normalized.as_str();

    let digest = {
        let mut h = Sha256::new();
        h.update(content.as_bytes());
        hex::encode(h.finalize())
    };

    let key = path.to_string_lossy().to_string();
    if let Some(stored) = hash_store.get(&key) {
        if stored == &digest {
            tracing::debug!("unchanged: {}", path.display());
            return Ok(WriteResult::Unchanged {
                path: path.to_path_buf(),
            });
        }
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    if let Some(tmp_parent) = tmp.parent() {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    hash_store.insert(key, digest);

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn write_content(path: &Path, content: &str) -> WriteResult {
        let mut store = HashMap::new();
        atomic_write(path, content, &mut store, false).unwrap()
    }

    #[test]
    fn first_write_returns_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.html");
        let result = write_content(&path, "<html></html>");
        assert!(matches!(result, WriteResult::Written { .. }));
        assert!(path.exists());
    }

    #[test]
    fn second_write_same_content_returns_unchanged() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("page.html");
        let mut store = HashMap::new();
        atomic_write(&path, "same content", &mut store, false).unwrap();
        let result = atomic_write(&path, "same content", &mut store, false).unwrap();
        assert!(matches!(result, WriteResult::Unchanged { .. }));
    }

    #[test]
    fn changed_content_returns_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("page.html");
        let mut store = HashMap::new();
        atomic_write(&path, "v1", &mut store, false).unwrap();
        let result = atomic_write(&path, "v2", &mut store, false).unwrap();
        assert!(matches!(result, WriteResult::Written { .. }));
    }

    #[test]
    fn dry_run_does_not_write_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.html");
        let mut store = HashMap::new();
        let result = atomic_write(&path, "content", &mut store, true).unwrap();
        assert!(matches!(result, WriteResult::WouldWrite { .. }));
        assert!(!path.exists(), "dry-run must not create files");
    }

    #[test]
    fn tmp_file_removed_after_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clean.html");
        write_content(&path, "data");
        let tmp_path = PathBuf::from(format!("{}.lingua.tmp", path.display()));
        assert!(!tmp_path.exists(), ".lingua.tmp must be cleaned up");
    }

    #[test]
    fn creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp
            .path()
            .join("projects")
            .join("weblate")
            .join("index.html");
        write_content(&path, "content");
        assert!(path.exists());
    }

    #[test]
    fn crlf_and_lf_content_share_the_same_hash() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("normalize.html");
        let mut store = HashMap::new();

        let first = atomic_write(&path, "line1\r\nline2\r\n", &mut store, false).unwrap();
        assert!(matches!(first, WriteResult::Written { .. }));

        let second = atomic_write(&path, "line1\nline2\n", &mut store, false).unwrap();
        assert!(matches!(second, WriteResult::Unchanged { .. }));

        let disk = fs::read_to_string(&path).unwrap();
        assert_eq!(disk, "line1\nline2\n");
    }

    #[test]
    #[cfg(unix)]
    fn rename_failure_leaves_original_and_cleans_tmp() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let readonly_dir = root.path().join("readonly");
        fs::create_dir_all(&readonly_dir).unwrap();

        let path = readonly_dir.join("page.html");
        fs::write(&path, "original").unwrap();

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        // Directory permissions do not bind root; nothing to assert then.
        if fs::write(readonly_dir.join("probe"), b"x").is_ok() {
            return;
        }

        let tmp_dir = TempDir::new().unwrap();
        let tmp_path = tmp_dir.path().join("page.html.lingua.tmp");

        let mut store = HashMap::new();
        let err = atomic_write_with_tmp(&path, "new content", &mut store, false, &tmp_path)
            .expect_err("rename should fail on readonly dir");
        let _ = err;

        let current = fs::read_to_string(&path).unwrap();
        assert_eq!(current, "original", "original file should be intact");
        assert!(!tmp_path.exists(), ".lingua.tmp should be cleaned up");

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&readonly_dir, perms).unwrap();
    }
}
