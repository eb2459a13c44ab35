//! Dry-run unified diff support for `lingua diff`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use similar::TextDiff;

use crate::error::{io_err, SiteError};
use crate::pipeline::{render_plan, BuildOptions, BuildScope};

/// A single rendered file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Diff result for a site build scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffResult {
    pub diffs: Vec<FileDiff>,
}

/// Render what `build` would generate and compare it to current on-disk
/// content.
///
/// No files are written and the hash store is not consulted; the comparison
/// is against what is actually on disk, so local edits show up even when
/// the store thinks the file is current.
pub fn diff_site(
    root: &Path,
    scope: BuildScope,
    opts: &BuildOptions,
) -> Result<DiffResult, SiteError> {
    let files = render_plan(root, &scope, opts)?;

    let mut diffs = Vec::new();
    for file in files {
        let rendered = normalize_line_endings(&file.content);
        let existing = read_existing_or_empty(&file.path)?;
        if existing == rendered {
            continue;
        }

        let relative = file
            .path
            .strip_prefix(&opts.out_dir)
            .unwrap_or(file.path.as_path());
        let old_header = format!("a/{}", relative.display());
        let new_header = format!("b/{}", relative.display());
        let unified = TextDiff::from_lines(&existing, &rendered)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();

        diffs.push(FileDiff {
            path: file.path,
            unified_diff: unified,
        });
    }

    Ok(DiffResult { diffs })
}

fn read_existing_or_empty(path: &Path) -> Result<String, SiteError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(normalize_line_endings(&content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(io_err(path, err)),
    }
}

fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n")
}
