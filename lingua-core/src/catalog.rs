//! Per-project YAML catalog.
//!
//! # Storage layout
//!
//! ```text
//! ~/.lingua/
//!   catalog/
//!     <project_slug>.yaml        (one file per project — mode 0600)
//!   glossary/
//!     <project_slug>/
//!       <lang>.yaml              (word list per language — mode 0600)
//! ```
//!
//! # API pattern
//!
//! Every function has two forms:
//! - `fn_at(root: &Path, …)` — explicit root; used in tests with `TempDir`
//! - `fn(…)` — derives `~/.lingua` from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.

use std::path::{Path, PathBuf};

use crate::error::CatalogError;
use crate::types::{GlossaryEntry, LanguageCode, Project, ProjectSlug};

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<root>/catalog/` — created (mode `0700`) if absent.
pub fn catalog_dir_at(root: &Path) -> Result<PathBuf, CatalogError> {
    let dir = root.join("catalog");
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        set_dir_permissions(&dir)?;
    }
    Ok(dir)
}

/// `<root>/catalog/<slug>.yaml` — pure, no I/O.
pub fn project_path_at(root: &Path, slug: &ProjectSlug) -> PathBuf {
    root.join("catalog").join(format!("{}.yaml", slug.0))
}

/// `<root>/glossary/<slug>/<lang>.yaml` — pure, no I/O.
pub fn glossary_path_at(root: &Path, slug: &ProjectSlug, lang: &LanguageCode) -> PathBuf {
    root.join("glossary")
        .join(&slug.0)
        .join(format!("{}.yaml", lang.0))
}

/// Default catalog root: `<home>/.lingua`.
pub fn default_root() -> Result<PathBuf, CatalogError> {
    Ok(home()?.join(".lingua"))
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load one project from `<root>/catalog/<slug>.yaml`.
///
/// Returns `CatalogError::ProjectNotFound` if absent,
/// `CatalogError::Parse` (with path + line context) if malformed YAML.
pub fn load_project_at(root: &Path, slug: &ProjectSlug) -> Result<Project, CatalogError> {
    let path = project_path_at(root, slug);
    if !path.exists() {
        return Err(CatalogError::ProjectNotFound { path });
    }
    let contents = std::fs::read_to_string(&path)?;
    serde_yaml::from_str(&contents).map_err(|e| CatalogError::Parse { path, source: e })
}

/// `load_project_at` convenience wrapper.
pub fn load_project(slug: &ProjectSlug) -> Result<Project, CatalogError> {
    load_project_at(&default_root()?, slug)
}

/// Walk `<root>/catalog/*.yaml` and return all projects, sorted by slug.
pub fn list_projects_at(root: &Path) -> Result<Vec<Project>, CatalogError> {
    let dir = root.join("catalog");
    if !dir.exists() {
        return Ok(vec![]);
    }

    let mut entries: Vec<_> = std::fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut projects = Vec::new();
    for entry in entries {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("yaml") {
            continue;
        }
        let contents = std::fs::read_to_string(&path)?;
        let project: Project = serde_yaml::from_str(&contents)
            .map_err(|e| CatalogError::Parse { path, source: e })?;
        projects.push(project);
    }
    projects.sort_by(|a, b| a.slug.0.cmp(&b.slug.0));
    Ok(projects)
}

/// `list_projects_at` convenience wrapper.
pub fn list_projects() -> Result<Vec<Project>, CatalogError> {
    list_projects_at(&default_root()?)
}

/// Load a glossary word list. A missing file is an empty glossary.
pub fn load_glossary_at(
    root: &Path,
    slug: &ProjectSlug,
    lang: &LanguageCode,
) -> Result<Vec<GlossaryEntry>, CatalogError> {
    let path = glossary_path_at(root, slug, lang);
    if !path.exists() {
        return Ok(vec![]);
    }
    let contents = std::fs::read_to_string(&path)?;
    serde_yaml::from_str(&contents).map_err(|e| CatalogError::Parse { path, source: e })
}

/// `load_glossary_at` convenience wrapper.
pub fn load_glossary(
    slug: &ProjectSlug,
    lang: &LanguageCode,
) -> Result<Vec<GlossaryEntry>, CatalogError> {
    load_glossary_at(&default_root()?, slug, lang)
}

// ---------------------------------------------------------------------------
// 3. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save a project to `<root>/catalog/<slug>.yaml`.
///
/// Write flow: serialize → `.yaml.tmp` sibling → `chmod 0600` → `rename`.
/// `.tmp` is always in the same directory as the target (same filesystem).
pub fn save_project_at(root: &Path, project: &Project) -> Result<(), CatalogError> {
    catalog_dir_at(root)?; // create dir + 0700 if absent
    let path = project_path_at(root, &project.slug);
    let tmp_path = path.with_file_name(format!("{}.yaml.tmp", project.slug.0));

    let yaml = serde_yaml::to_string(project)?;
    std::fs::write(&tmp_path, yaml)?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, &path)?;
    Ok(())
}

/// `save_project_at` convenience wrapper.
pub fn save_project(project: &Project) -> Result<(), CatalogError> {
    save_project_at(&default_root()?, project)
}

/// Atomically save a glossary word list, sorted by source word.
///
/// Sorting on save keeps glossary exports and pages alphabetical without
/// each consumer re-sorting.
pub fn save_glossary_at(
    root: &Path,
    slug: &ProjectSlug,
    lang: &LanguageCode,
    entries: &[GlossaryEntry],
) -> Result<(), CatalogError> {
    let path = glossary_path_at(root, slug, lang);
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
            set_dir_permissions(parent)?;
        }
    }
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| a.source.cmp(&b.source));

    let tmp_path = path.with_file_name(format!("{}.yaml.tmp", lang.0));
    let yaml = serde_yaml::to_string(&sorted)?;
    std::fs::write(&tmp_path, yaml)?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, &path)?;
    Ok(())
}

/// `save_glossary_at` convenience wrapper.
pub fn save_glossary(
    slug: &ProjectSlug,
    lang: &LanguageCode,
    entries: &[GlossaryEntry],
) -> Result<(), CatalogError> {
    save_glossary_at(&default_root()?, slug, lang, entries)
}

// ---------------------------------------------------------------------------
// 4. Init
// ---------------------------------------------------------------------------

/// Register an empty project under `slug`.
///
/// Idempotent: if the file already exists, loads and returns it unchanged.
pub fn init_project_at(
    root: &Path,
    slug: ProjectSlug,
    name: String,
) -> Result<Project, CatalogError> {
    let path = project_path_at(root, &slug);
    if path.exists() {
        return load_project_at(root, &slug);
    }

    let project = Project {
        slug,
        name,
        instructions: None,
        web_url: None,
        subprojects: vec![],
        glossaries: vec![],
        last_changes: vec![],
    };
    save_project_at(root, &project)?;
    Ok(project)
}

/// `init_project_at` convenience wrapper.
pub fn init_project(slug: ProjectSlug, name: String) -> Result<Project, CatalogError> {
    init_project_at(&default_root()?, slug, name)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, CatalogError> {
    dirs::home_dir().ok_or(CatalogError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), CatalogError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), CatalogError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), CatalogError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), CatalogError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
