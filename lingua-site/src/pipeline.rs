//! Site build pipeline shared by `lingua build` and `lingua diff`.
//!
//! A build renders every page in scope, writes changed files through the
//! hash-gated atomic writer, and persists the hash store once at the end.
//! The shared index and checks pages always cover the full catalog, even
//! when the scope is a single project, so cross-project figures stay
//! consistent after a scoped rebuild.

use std::path::{Path, PathBuf};

use chrono::Utc;

use lingua_core::catalog;
use lingua_core::types::{Permissions, Project, ProjectSlug};
use lingua_export::stats_json;
use lingua_pages::{MessageCatalog, PageContext, PageEngine, PageKind};

use crate::error::SiteError;
use crate::hash_store;
use crate::writer::{atomic_write, WriteResult};

// ---------------------------------------------------------------------------
// Scope and options
// ---------------------------------------------------------------------------

/// Scope for a build pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildScope {
    /// Build every project in the catalog.
    All,
    /// Build a single project by slug (shared pages are still rebuilt).
    Project(String),
}

/// Options shared by `lingua build` and `lingua diff`.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Site heading shown on every page.
    pub site_title: String,
    /// Root directory the static site is written under.
    pub out_dir: PathBuf,
    /// Viewer capabilities baked into the rendered pages.
    pub perms: Permissions,
    /// Message catalog for translated labels; `None` renders English.
    pub messages: Option<MessageCatalog>,
    /// Directory of `.tera` files overriding the embedded templates.
    pub user_template_dir: Option<PathBuf>,
    /// When set, report what would be written without touching disk.
    pub dry_run: bool,
}

/// One rendered output file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub content: String,
}

/// Result of a build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    pub results: Vec<WriteResult>,
}

impl BuildResult {
    pub fn written(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r, WriteResult::Written { .. }))
            .count()
    }

    pub fn unchanged(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r, WriteResult::Unchanged { .. }))
            .count()
    }

    pub fn would_write(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r, WriteResult::WouldWrite { .. }))
            .count()
    }
}

// ---------------------------------------------------------------------------
// Render plan
// ---------------------------------------------------------------------------

/// Render every page in scope without writing anything.
///
/// Shared between the build run and the dry-run differ so both always see
/// the same output set.
pub(crate) fn render_plan(
    root: &Path,
    scope: &BuildScope,
    opts: &BuildOptions,
) -> Result<Vec<RenderedFile>, SiteError> {
    let projects = catalog::list_projects_at(root)?;
    let engine = PageEngine::new(opts.messages.clone(), opts.user_template_dir.as_deref())?;
    let out = opts.out_dir.as_path();

    let mut files = Vec::new();

    let index_ctx = PageContext::index(&opts.site_title, &projects, &opts.perms);
    files.push(RenderedFile {
        path: PageKind::Index.output_path(out),
        content: engine.render(&PageKind::Index, &index_ctx)?,
    });

    let checks_ctx = PageContext::checks(&opts.site_title, &projects, &opts.perms);
    files.push(RenderedFile {
        path: PageKind::Checks.output_path(out),
        content: engine.render(&PageKind::Checks, &checks_ctx)?,
    });

    let selected: Vec<Project> = match scope {
        BuildScope::All => projects,
        // Load directly so a missing slug reports the catalog path it
        // looked at.
        BuildScope::Project(slug) => {
            vec![catalog::load_project_at(root, &ProjectSlug::from(slug.as_str()))?]
        }
    };

    for project in &selected {
        files.extend(render_project(root, out, &engine, project, opts)?);
    }

    Ok(files)
}

fn render_project(
    root: &Path,
    out: &Path,
    engine: &PageEngine,
    project: &Project,
    opts: &BuildOptions,
) -> Result<Vec<RenderedFile>, SiteError> {
    let mut files = Vec::new();
    let ctx = PageContext::project(&opts.site_title, project, &opts.perms);

    let kind = PageKind::Project { slug: project.slug.clone() };
    files.push(RenderedFile {
        path: kind.output_path(out),
        content: engine.render(&kind, &ctx)?,
    });

    let kind = PageKind::Glossaries { slug: project.slug.clone() };
    files.push(RenderedFile {
        path: kind.output_path(out),
        content: engine.render(&kind, &ctx)?,
    });

    for glossary in &project.glossaries {
        let words = catalog::load_glossary_at(root, &project.slug, &glossary.language)?;
        let ctx = PageContext::glossary(
            &opts.site_title,
            project,
            &glossary.language,
            &words,
            &opts.perms,
        );
        let kind = PageKind::Glossary {
            slug: project.slug.clone(),
            lang: glossary.language.clone(),
        };
        files.push(RenderedFile {
            path: kind.output_path(out),
            content: engine.render(&kind, &ctx)?,
        });
    }

    for sub in &project.subprojects {
        files.push(RenderedFile {
            path: out
                .join("exports")
                .join("stats")
                .join(&project.slug.0)
                .join(&sub.slug.0)
                .join("index.json"),
            content: stats_json(project, &sub.slug)?,
        });
    }

    Ok(files)
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Run the build pipeline for a scope.
///
/// The hash store is loaded once, threaded through every write, and saved
/// once at the end. Dry runs never touch the store or `synced_at`.
pub fn run(root: &Path, scope: BuildScope, opts: &BuildOptions) -> Result<BuildResult, SiteError> {
    let files = render_plan(root, &scope, opts)?;

    let mut store = hash_store::load_at(root)?;
    let mut results = Vec::with_capacity(files.len());
    for file in &files {
        results.push(atomic_write(
            &file.path,
            &file.content,
            &mut store.files,
            opts.dry_run,
        )?);
    }

    if !opts.dry_run {
        store.synced_at = Utc::now();
        hash_store::save_at(root, &store)?;
    }

    let result = BuildResult { results };
    tracing::info!(
        "build finished: {} written, {} unchanged",
        result.written(),
        result.unchanged()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use lingua_core::catalog::save_project_at;
    use lingua_core::types::{Subproject, SubprojectSlug, UnitCounts};
    use tempfile::TempDir;

    use super::*;

    fn options(out_dir: PathBuf, dry_run: bool) -> BuildOptions {
        BuildOptions {
            site_title: "Lingua".to_string(),
            out_dir,
            perms: Permissions::none(),
            messages: None,
            user_template_dir: None,
            dry_run,
        }
    }

    fn seed_project(root: &Path, slug: &str) {
        let project = Project {
            slug: ProjectSlug::from(slug),
            name: slug.to_string(),
            instructions: None,
            web_url: None,
            subprojects: vec![Subproject {
                slug: SubprojectSlug::from("master"),
                name: "master".to_string(),
                counts: UnitCounts { total: 100, translated: 50, fuzzy: 10, failing: 5 },
            }],
            glossaries: vec![],
            last_changes: vec![],
        };
        save_project_at(root, &project).expect("save project");
    }

    #[test]
    fn empty_catalog_still_renders_shared_pages() {
        let root = TempDir::new().expect("root");
        let out = TempDir::new().expect("out");
        let files = render_plan(
            root.path(),
            &BuildScope::All,
            &options(out.path().to_path_buf(), false),
        )
        .expect("plan");
        let names: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            names,
            vec![
                out.path().join("index.html"),
                out.path().join("checks").join("index.html"),
            ]
        );
    }

    #[test]
    fn project_scope_includes_shared_and_project_pages() {
        let root = TempDir::new().expect("root");
        let out = TempDir::new().expect("out");
        seed_project(root.path(), "weblate");
        seed_project(root.path(), "phpmyadmin");

        let files = render_plan(
            root.path(),
            &BuildScope::Project("weblate".to_string()),
            &options(out.path().to_path_buf(), false),
        )
        .expect("plan");

        let paths: Vec<String> = files
            .iter()
            .map(|f| f.path.display().to_string())
            .collect();
        assert!(paths.iter().any(|p| p.ends_with("checks/index.html")));
        assert!(paths.iter().any(|p| p.contains("projects/weblate")));
        assert!(paths.iter().any(|p| p.contains("exports/stats/weblate/master")));
        assert!(
            !paths.iter().any(|p| p.contains("projects/phpmyadmin")),
            "scoped build must not render other projects' pages"
        );
    }

    #[test]
    fn unknown_project_scope_errors() {
        let root = TempDir::new().expect("root");
        let out = TempDir::new().expect("out");
        let err = render_plan(
            root.path(),
            &BuildScope::Project("missing".to_string()),
            &options(out.path().to_path_buf(), false),
        )
        .expect_err("missing project should fail");
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn run_writes_then_reports_unchanged() {
        let root = TempDir::new().expect("root");
        let out = TempDir::new().expect("out");
        seed_project(root.path(), "weblate");
        let opts = options(out.path().to_path_buf(), false);

        let first = run(root.path(), BuildScope::All, &opts).expect("first build");
        assert!(first.written() > 0);
        assert_eq!(first.unchanged(), 0);

        let second = run(root.path(), BuildScope::All, &opts).expect("second build");
        assert_eq!(second.written(), 0);
        assert_eq!(second.unchanged(), first.written());
    }
}
