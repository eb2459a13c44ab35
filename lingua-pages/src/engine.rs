//! Tera rendering engine — [`PageKind`] enum and [`PageEngine`].
//!
//! # Page map
//!
//! | Page        | Output path (relative to site root)          |
//! |-------------|----------------------------------------------|
//! | Index       | `index.html`                                 |
//! | Project     | `projects/<slug>/index.html`                 |
//! | Glossaries  | `dictionaries/<slug>/index.html`             |
//! | Glossary    | `dictionaries/<slug>/<lang>/index.html`      |
//! | Checks      | `checks/index.html`                          |

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tera::{Tera, Value};

use lingua_core::routes::Route;
use lingua_core::types::{LanguageCode, ProjectSlug, SubprojectSlug};

use crate::context::PageContext;
use crate::error::PageError;
use crate::i18n::{MessageCatalog, Translate};

// ---------------------------------------------------------------------------
// Embedded templates — baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("shared/base.html.tera", include_str!("templates/_partials/base.html.tera")),
    (
        "shared/_project_info.html.tera",
        include_str!("templates/_partials/project_info.html.tera"),
    ),
    (
        "shared/_last_changes.html.tera",
        include_str!("templates/_partials/last_changes.html.tera"),
    ),
    ("shared/_share.html.tera", include_str!("templates/_partials/share.html.tera")),
    (
        "shared/_progress.html.tera",
        include_str!("templates/_partials/progress.html.tera"),
    ),
    ("pages/index.html.tera", include_str!("templates/index.html.tera")),
    ("pages/project.html.tera", include_str!("templates/project.html.tera")),
    ("pages/glossaries.html.tera", include_str!("templates/glossaries.html.tera")),
    ("pages/glossary.html.tera", include_str!("templates/glossary.html.tera")),
    ("pages/checks.html.tera", include_str!("templates/checks.html.tera")),
];

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> PageError {
    PageError::Io { path: path.into(), source }
}

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").to_lowercase()
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), PageError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, PageError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    let mut templates = Vec::new();
    for path in files {
        if path.extension().and_then(|s| s.to_str()) != Some("tera") {
            continue;
        }
        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        templates.push((name, contents));
    }
    Ok(templates)
}

fn build_tera(
    catalog: Option<Arc<MessageCatalog>>,
    user_template_dir: Option<&Path>,
) -> Result<Tera, PageError> {
    let mut templates: HashMap<String, String> = HashMap::new();
    for (name, content) in TPLS {
        templates.insert(
            normalize_template_name(Path::new(name)),
            (*content).to_string(),
        );
    }
    if let Some(dir) = user_template_dir {
        for (name, content) in load_user_templates(dir)? {
            templates.insert(name, content);
        }
    }

    let mut tera = Tera::default();
    let items: Vec<(String, String)> = templates.into_iter().collect();
    tera.add_raw_templates(items)?;
    tera.register_filter("percent", Percent);
    tera.register_function("url", UrlFor);
    tera.register_function("t", Translate::new(catalog));
    Ok(tera)
}

// ---------------------------------------------------------------------------
// Tera extensions
// ---------------------------------------------------------------------------

/// Filter `percent` — format an unrounded percentage to zero decimal places.
///
/// Clamps to `[0, 100]` before formatting so a template can never show an
/// out-of-range figure, whatever the context held.
struct Percent;

impl tera::Filter for Percent {
    fn filter(&self, value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        let v = value
            .as_f64()
            .ok_or_else(|| tera::Error::msg("percent filter expects a number"))?;
        Ok(Value::String(format!("{:.0}", v.clamp(0.0, 100.0))))
    }
}

/// Function `url(route=..., …)` — named-route reversal.
struct UrlFor;

fn required_arg(args: &HashMap<String, Value>, key: &str) -> tera::Result<String> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| tera::Error::msg(format!("url() requires a string `{key}` argument")))
}

impl tera::Function for UrlFor {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let route = required_arg(args, "route")?;
        let url = match route.as_str() {
            "home" => Route::Home.reverse(),
            "project" => {
                let project = ProjectSlug::from(required_arg(args, "project")?);
                Route::Project { project: &project }.reverse()
            }
            "subproject" => {
                let project = ProjectSlug::from(required_arg(args, "project")?);
                let subproject = SubprojectSlug::from(required_arg(args, "subproject")?);
                Route::Subproject { project: &project, subproject: &subproject }.reverse()
            }
            "git_status" => {
                let project = ProjectSlug::from(required_arg(args, "project")?);
                Route::GitStatus { project: &project }.reverse()
            }
            "activity" => {
                let project = ProjectSlug::from(required_arg(args, "project")?);
                Route::Activity { project: &project }.reverse()
            }
            "glossaries" => {
                let project = ProjectSlug::from(required_arg(args, "project")?);
                Route::Glossaries { project: &project }.reverse()
            }
            "glossary" => {
                let project = ProjectSlug::from(required_arg(args, "project")?);
                let lang = LanguageCode::from(required_arg(args, "lang")?);
                Route::Glossary { project: &project, lang: &lang }.reverse()
            }
            "widgets" => {
                let project = ProjectSlug::from(required_arg(args, "project")?);
                Route::Widgets { project: &project }.reverse()
            }
            "checks" => Route::Checks.reverse(),
            "export_stats" => {
                let project = ProjectSlug::from(required_arg(args, "project")?);
                let subproject = SubprojectSlug::from(required_arg(args, "subproject")?);
                Route::ExportStats { project: &project, subproject: &subproject }.reverse()
            }
            other => {
                return Err(tera::Error::msg(format!("url(): unknown route '{other}'")));
            }
        };
        Ok(Value::String(url))
    }

    fn is_safe(&self) -> bool {
        // Reversed URLs are percent-encoded already.
        true
    }
}

// ---------------------------------------------------------------------------
// PageKind
// ---------------------------------------------------------------------------

/// All pages the site renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Site index: project list with aggregate progress.
    Index,
    /// Project detail page: subproject table, tabs, glossaries, sharing.
    Project { slug: ProjectSlug },
    /// Per-project glossary list.
    Glossaries { slug: ProjectSlug },
    /// Per-language glossary word table.
    Glossary { slug: ProjectSlug, lang: LanguageCode },
    /// Failing-checks overview across all projects.
    Checks,
}

impl PageKind {
    /// Template name rendered for this page.
    pub fn template_name(&self) -> &'static str {
        match self {
            PageKind::Index => "pages/index.html.tera",
            PageKind::Project { .. } => "pages/project.html.tera",
            PageKind::Glossaries { .. } => "pages/glossaries.html.tera",
            PageKind::Glossary { .. } => "pages/glossary.html.tera",
            PageKind::Checks => "pages/checks.html.tera",
        }
    }

    /// Output path for this page, relative to `site_root`.
    ///
    /// Every page lands as `…/index.html` so the emitted directory-style
    /// links (`/projects/<slug>/`) resolve when served statically.
    pub fn output_path(&self, site_root: &Path) -> PathBuf {
        match self {
            PageKind::Index => site_root.join("index.html"),
            PageKind::Project { slug } => {
                site_root.join("projects").join(&slug.0).join("index.html")
            }
            PageKind::Glossaries { slug } => {
                site_root.join("dictionaries").join(&slug.0).join("index.html")
            }
            PageKind::Glossary { slug, lang } => site_root
                .join("dictionaries")
                .join(&slug.0)
                .join(&lang.0)
                .join("index.html"),
            PageKind::Checks => site_root.join("checks").join("index.html"),
        }
    }
}

// ---------------------------------------------------------------------------
// PageEngine
// ---------------------------------------------------------------------------

/// Tera-based engine rendering site pages with optional user overrides.
///
/// `user_template_dir` may contain `.tera` files that override embedded
/// defaults. Template names are normalised to lowercase and relative paths.
/// The engine is built per locale: pass a [`MessageCatalog`] to translate
/// every label, or `None` for English.
pub struct PageEngine {
    tera: Tera,
}

impl PageEngine {
    /// Construct a new [`PageEngine`], loading embedded templates plus any
    /// overrides found in `user_template_dir`.
    pub fn new(
        catalog: Option<MessageCatalog>,
        user_template_dir: Option<&Path>,
    ) -> Result<Self, PageError> {
        let tera = build_tera(catalog.map(Arc::new), user_template_dir)?;
        Ok(PageEngine { tera })
    }

    /// Render one page to its HTML string.
    pub fn render(&self, kind: &PageKind, ctx: &PageContext) -> Result<String, PageError> {
        let tera_ctx = ctx.to_tera_context()?;
        let html = self.tera.render(kind.template_name(), &tera_ctx)?;
        Ok(html)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lingua_core::types::{Permissions, Project, Subproject, UnitCounts};

    fn make_project(name: &str) -> Project {
        Project {
            slug: ProjectSlug::from(name),
            name: name.to_string(),
            instructions: None,
            web_url: None,
            subprojects: vec![Subproject {
                slug: SubprojectSlug::from("master"),
                name: "master".to_string(),
                counts: UnitCounts { total: 100, translated: 50, fuzzy: 10, failing: 5 },
            }],
            glossaries: vec![],
            last_changes: vec![],
        }
    }

    #[test]
    fn engine_new_succeeds() {
        PageEngine::new(None, None).expect("PageEngine::new should succeed with embedded templates");
    }

    #[test]
    fn all_pages_render_without_error() {
        let engine = PageEngine::new(None, None).unwrap();
        let project = make_project("testapp");
        let perms = Permissions::none();
        let cs = LanguageCode::from("cs");

        let cases: Vec<(PageKind, PageContext)> = vec![
            (PageKind::Index, PageContext::index("Lingua", &[project.clone()], &perms)),
            (
                PageKind::Project { slug: project.slug.clone() },
                PageContext::project("Lingua", &project, &perms),
            ),
            (
                PageKind::Glossaries { slug: project.slug.clone() },
                PageContext::project("Lingua", &project, &perms),
            ),
            (
                PageKind::Glossary { slug: project.slug.clone(), lang: cs.clone() },
                PageContext::glossary("Lingua", &project, &cs, &[], &perms),
            ),
            (PageKind::Checks, PageContext::checks("Lingua", &[project.clone()], &perms)),
        ];

        for (kind, ctx) in &cases {
            let html = engine
                .render(kind, ctx)
                .unwrap_or_else(|e| panic!("render failed for {kind:?}: {e}"));
            assert!(html.contains("testapp"), "rendered {kind:?} should mention the project");
        }
    }

    #[test]
    fn output_paths_are_directory_style() {
        let root = PathBuf::from("/site");
        let slug = ProjectSlug::from("weblate");
        let cs = LanguageCode::from("cs");
        assert_eq!(PageKind::Index.output_path(&root), PathBuf::from("/site/index.html"));
        assert_eq!(
            PageKind::Project { slug: slug.clone() }.output_path(&root),
            PathBuf::from("/site/projects/weblate/index.html")
        );
        assert_eq!(
            PageKind::Glossary { slug, lang: cs }.output_path(&root),
            PathBuf::from("/site/dictionaries/weblate/cs/index.html")
        );
    }

    #[test]
    fn user_template_overrides_embedded() {
        let dir = tempfile::TempDir::new().unwrap();
        let pages = dir.path().join("pages");
        std::fs::create_dir_all(&pages).unwrap();
        std::fs::write(pages.join("index.html.tera"), "custom: {{ site_title }}").unwrap();

        let engine = PageEngine::new(None, Some(dir.path())).unwrap();
        let ctx = PageContext::index("Lingua", &[], &Permissions::none());
        let html = engine.render(&PageKind::Index, &ctx).unwrap();
        assert_eq!(html, "custom: Lingua");
    }

    #[test]
    fn percent_filter_rounds_to_whole_numbers() {
        use tera::Filter as _;
        let out = Percent.filter(&Value::from(86.5_f64), &HashMap::new()).unwrap();
        assert_eq!(out, Value::String("86".to_string()));
        let out = Percent.filter(&Value::from(86.6_f64), &HashMap::new()).unwrap();
        assert_eq!(out, Value::String("87".to_string()));
        let out = Percent.filter(&Value::from(250.0_f64), &HashMap::new()).unwrap();
        assert_eq!(out, Value::String("100".to_string()), "clamped before formatting");
    }

    #[test]
    fn url_function_reverses_routes() {
        use tera::Function as _;
        let mut args = HashMap::new();
        args.insert("route".to_string(), Value::from("glossaries"));
        args.insert("project".to_string(), Value::from("weblate"));
        let out = UrlFor.call(&args).unwrap();
        assert_eq!(out, Value::String("/dictionaries/weblate/".to_string()));
    }

    #[test]
    fn url_function_rejects_unknown_route() {
        use tera::Function as _;
        let mut args = HashMap::new();
        args.insert("route".to_string(), Value::from("nonsense"));
        assert!(UrlFor.call(&args).is_err());
    }
}
