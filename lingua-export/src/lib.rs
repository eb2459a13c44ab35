//! # lingua-export
//!
//! Data exports for the translation dashboard:
//! - [`glossary_csv`] — `source,target` word list, ordered by source word
//! - [`stats_json`] — the per-subproject statistics payload served at the
//!   export endpoint linked from the project page

pub mod error;

use serde::{Deserialize, Serialize};

use lingua_core::routes::Route;
use lingua_core::types::{GlossaryEntry, Project, SubprojectSlug};

pub use error::ExportError;

// ---------------------------------------------------------------------------
// Glossary CSV
// ---------------------------------------------------------------------------

/// Render a glossary word list as CSV, one `source,target` row per word,
/// sorted by source word.
pub fn glossary_csv(entries: &[GlossaryEntry]) -> Result<String, ExportError> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| a.source.cmp(&b.source));

    let mut writer = csv::Writer::from_writer(Vec::new());
    for entry in &sorted {
        writer.write_record([entry.source.as_str(), entry.target.as_str()])?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

// ---------------------------------------------------------------------------
// Statistics JSON
// ---------------------------------------------------------------------------

/// The export-endpoint payload for one subproject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubprojectStats {
    pub project: String,
    pub subproject: String,
    pub name: String,
    pub url: String,
    pub total: u64,
    pub translated: u64,
    pub fuzzy: u64,
    pub failing: u64,
    pub translated_percent: f64,
    pub fuzzy_percent: f64,
    pub failing_percent: f64,
}

impl SubprojectStats {
    /// Build the stats payload for `subproject` of `project`.
    pub fn for_subproject(
        project: &Project,
        subproject: &SubprojectSlug,
    ) -> Result<Self, ExportError> {
        let sub = project.subproject(subproject).ok_or_else(|| {
            ExportError::SubprojectNotFound {
                project: project.slug.0.clone(),
                subproject: subproject.0.clone(),
            }
        })?;
        Ok(SubprojectStats {
            project: project.slug.0.clone(),
            subproject: sub.slug.0.clone(),
            name: sub.name.clone(),
            url: Route::Subproject { project: &project.slug, subproject: &sub.slug }.reverse(),
            total: sub.counts.total,
            translated: sub.counts.translated,
            fuzzy: sub.counts.fuzzy,
            failing: sub.counts.failing,
            translated_percent: sub.counts.translated_percent(),
            fuzzy_percent: sub.counts.fuzzy_percent(),
            failing_percent: sub.counts.failing_percent(),
        })
    }
}

/// Serialize the stats payload for one subproject as pretty-printed JSON.
pub fn stats_json(project: &Project, subproject: &SubprojectSlug) -> Result<String, ExportError> {
    let stats = SubprojectStats::for_subproject(project, subproject)?;
    Ok(serde_json::to_string_pretty(&stats)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
