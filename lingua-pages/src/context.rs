//! Page context — serializable rendering payload built from catalog types.
//!
//! Percentages are pre-derived here (as raw `f64`), so templates only
//! format; rounding to whole percent happens in the `percent` filter,
//! while `data-*` attributes carry the unrounded values.

use serde::{Deserialize, Serialize};

use lingua_core::routes::Route;
use lingua_core::types::{GlossaryEntry, LanguageCode, Permissions, Project, Subproject};

use crate::error::PageError;

/// Rendering payload for one page.
///
/// Page-scoped fields are optional; each [`PageKind`](crate::PageKind)
/// template only reads the parts its constructor filled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContext {
    /// Site heading, shown on every page.
    pub site_title: String,
    /// Generator version string for the page footer.
    pub generator: String,
    /// Viewer capability flags.
    pub perms: PermsCtx,
    /// All projects — index and checks pages.
    pub projects: Vec<ProjectCtx>,
    /// The current project — project-scoped pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectCtx>,
    /// Word list payload — the per-language glossary page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glossary: Option<GlossaryPageCtx>,
}

/// Serializable viewer capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermsCtx {
    pub commit_translation: bool,
    pub update_translation: bool,
    /// Disjunction of the two repository flags; gates the maintenance link.
    pub may_maintain_repo: bool,
    pub add_glossary: bool,
    pub change_glossary: bool,
    pub delete_glossary: bool,
    pub upload_glossary: bool,
}

impl From<&Permissions> for PermsCtx {
    fn from(p: &Permissions) -> Self {
        PermsCtx {
            commit_translation: p.commit_translation,
            update_translation: p.update_translation,
            may_maintain_repo: p.may_maintain_repo(),
            add_glossary: p.add_glossary,
            change_glossary: p.change_glossary,
            delete_glossary: p.delete_glossary,
            upload_glossary: p.upload_glossary,
        }
    }
}

/// Serializable project payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCtx {
    pub slug: String,
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub subprojects: Vec<SubprojectCtx>,
    pub glossaries: Vec<GlossaryRefCtx>,
    pub changes: Vec<ChangeCtx>,
    /// Aggregate progress across all subprojects.
    pub progress: ProgressCtx,
}

/// Serializable subproject row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubprojectCtx {
    pub slug: String,
    pub name: String,
    pub url: String,
    pub export_url: String,
    /// Unrounded percentages, `[0, 100]`.
    pub translated: f64,
    pub fuzzy: f64,
    pub failing: f64,
    /// Raw counters for the checks page.
    pub total_units: u64,
    pub failing_units: u64,
}

/// Unrounded aggregate percentages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressCtx {
    pub translated: f64,
    pub fuzzy: f64,
    pub failing: f64,
}

/// Serializable glossary reference (language + resolved URL).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlossaryRefCtx {
    pub code: String,
    pub name: String,
    pub url: String,
}

/// Serializable activity-feed row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeCtx {
    /// Pre-formatted UTC timestamp, `YYYY-MM-DD HH:MM`.
    pub timestamp: String,
    pub author: String,
    pub action: String,
    pub target: String,
}

/// Payload for the per-language glossary page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlossaryPageCtx {
    pub code: String,
    /// Display label, falls back to the code when the project has no
    /// matching glossary reference.
    pub name: String,
    pub words: Vec<GlossaryEntry>,
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

impl PageContext {
    /// Context for the site index: all projects, no current project.
    pub fn index(site_title: &str, projects: &[Project], perms: &Permissions) -> Self {
        Self {
            site_title: site_title.to_string(),
            generator: generator(),
            perms: perms.into(),
            projects: projects.iter().map(project_ctx).collect(),
            project: None,
            glossary: None,
        }
    }

    /// Context for a project detail page (also serves the glossaries page).
    pub fn project(site_title: &str, project: &Project, perms: &Permissions) -> Self {
        Self {
            site_title: site_title.to_string(),
            generator: generator(),
            perms: perms.into(),
            projects: vec![],
            project: Some(project_ctx(project)),
            glossary: None,
        }
    }

    /// Context for one per-language glossary page.
    pub fn glossary(
        site_title: &str,
        project: &Project,
        lang: &LanguageCode,
        words: &[GlossaryEntry],
        perms: &Permissions,
    ) -> Self {
        let name = project
            .glossaries
            .iter()
            .find(|g| &g.language == lang)
            .map(|g| g.name.clone())
            .unwrap_or_else(|| lang.0.clone());
        Self {
            site_title: site_title.to_string(),
            generator: generator(),
            perms: perms.into(),
            projects: vec![],
            project: Some(project_ctx(project)),
            glossary: Some(GlossaryPageCtx {
                code: lang.0.clone(),
                name,
                words: words.to_vec(),
            }),
        }
    }

    /// Context for the failing-checks overview: all projects.
    pub fn checks(site_title: &str, projects: &[Project], perms: &Permissions) -> Self {
        Self::index(site_title, projects, perms)
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, PageError> {
        tera::Context::from_serialize(self).map_err(PageError::from)
    }
}

fn generator() -> String {
    format!("lingua {}", env!("CARGO_PKG_VERSION"))
}

fn project_ctx(project: &Project) -> ProjectCtx {
    let agg = project.aggregate_counts();
    ProjectCtx {
        slug: project.slug.0.clone(),
        name: project.name.clone(),
        url: Route::Project { project: &project.slug }.reverse(),
        web_url: project.web_url.clone(),
        instructions: project.instructions.clone(),
        subprojects: project
            .subprojects
            .iter()
            .map(|sub| subproject_ctx(project, sub))
            .collect(),
        glossaries: project
            .glossaries
            .iter()
            .map(|g| GlossaryRefCtx {
                code: g.language.0.clone(),
                name: g.name.clone(),
                url: Route::Glossary { project: &project.slug, lang: &g.language }.reverse(),
            })
            .collect(),
        changes: project
            .last_changes
            .iter()
            .map(|c| ChangeCtx {
                timestamp: c.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                author: c.author.clone(),
                action: c.action.clone(),
                target: c.target.clone(),
            })
            .collect(),
        progress: ProgressCtx {
            translated: agg.translated_percent(),
            fuzzy: agg.fuzzy_percent(),
            failing: agg.failing_percent(),
        },
    }
}

fn subproject_ctx(project: &Project, sub: &Subproject) -> SubprojectCtx {
    SubprojectCtx {
        slug: sub.slug.0.clone(),
        name: sub.name.clone(),
        url: Route::Subproject { project: &project.slug, subproject: &sub.slug }.reverse(),
        export_url: Route::ExportStats { project: &project.slug, subproject: &sub.slug }
            .reverse(),
        translated: sub.counts.translated_percent(),
        fuzzy: sub.counts.fuzzy_percent(),
        failing: sub.counts.failing_percent(),
        total_units: sub.counts.total,
        failing_units: sub.counts.failing,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
