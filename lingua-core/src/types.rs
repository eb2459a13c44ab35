//! Domain types for the lingua catalog.
//!
//! Percentages are never stored; they are derived from [`UnitCounts`] on
//! demand so the counters stay the single source of truth.
//! All types are serializable/deserializable via serde + serde_yaml.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed URL slug for a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectSlug(pub String);

impl fmt::Display for ProjectSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectSlug {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectSlug {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed URL slug for a subproject inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubprojectSlug(pub String);

impl fmt::Display for SubprojectSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for SubprojectSlug {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SubprojectSlug {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A BCP-47-ish language code (`cs`, `pt_BR`, …).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageCode(pub String);

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for LanguageCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LanguageCode {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Translation statistics
// ---------------------------------------------------------------------------

/// Raw per-subproject unit counters.
///
/// `translated` are confirmed strings, `fuzzy` are strings flagged as
/// needing review, `failing` are strings violating automated checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UnitCounts {
    pub total: u64,
    #[serde(default)]
    pub translated: u64,
    #[serde(default)]
    pub fuzzy: u64,
    #[serde(default)]
    pub failing: u64,
}

impl UnitCounts {
    /// Percentage of translated units, in `[0, 100]`. Zero when `total == 0`.
    pub fn translated_percent(&self) -> f64 {
        percent(self.translated, self.total)
    }

    /// Percentage of fuzzy (needs review) units, in `[0, 100]`.
    pub fn fuzzy_percent(&self) -> f64 {
        percent(self.fuzzy, self.total)
    }

    /// Percentage of units failing checks, in `[0, 100]`.
    pub fn failing_percent(&self) -> f64 {
        percent(self.failing, self.total)
    }
}

/// `count / total * 100`, clamped to `[0, 100]`.
///
/// Clamping means inconsistent counters (count > total) can never leak an
/// out-of-range percentage to templates or exports.
fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = count as f64 * 100.0 / total as f64;
    pct.clamp(0.0, 100.0)
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A translation component nested under a project, tracked for independent
/// translation progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subproject {
    pub slug: SubprojectSlug,
    pub name: String,
    #[serde(default)]
    pub counts: UnitCounts,
}

/// Reference to a per-language glossary of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryRef {
    pub language: LanguageCode,
    /// Display label, e.g. `"Czech"`.
    pub name: String,
}

/// One source/target word pair in a glossary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub source: String,
    pub target: String,
}

/// One row of a project's activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub timestamp: DateTime<Utc>,
    pub author: String,
    /// Human-readable action, e.g. `"Translation updated"`.
    pub action: String,
    /// What was acted on, e.g. `"weblate/master — Czech"`.
    pub target: String,
}

/// Capability flags evaluated for the current viewer.
///
/// These arrive pre-evaluated; lingua never decides who may do what, it
/// only shows or hides links accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Permissions {
    #[serde(default)]
    pub commit_translation: bool,
    #[serde(default)]
    pub update_translation: bool,
    #[serde(default)]
    pub add_glossary: bool,
    #[serde(default)]
    pub change_glossary: bool,
    #[serde(default)]
    pub delete_glossary: bool,
    #[serde(default)]
    pub upload_glossary: bool,
}

impl Permissions {
    /// No capabilities at all — the anonymous viewer.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether the viewer may reach the git maintenance view.
    pub fn may_maintain_repo(&self) -> bool {
        self.commit_translation || self.update_translation
    }
}

/// A translation project: ordered subprojects plus per-language glossaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub slug: ProjectSlug,
    pub name: String,
    /// Translator instructions shown on the project page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Upstream project website.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
    #[serde(default)]
    pub subprojects: Vec<Subproject>,
    #[serde(default)]
    pub glossaries: Vec<GlossaryRef>,
    #[serde(default)]
    pub last_changes: Vec<Change>,
}

impl Project {
    /// Counters summed across all subprojects.
    pub fn aggregate_counts(&self) -> UnitCounts {
        let mut agg = UnitCounts::default();
        for sub in &self.subprojects {
            agg.total += sub.counts.total;
            agg.translated += sub.counts.translated;
            agg.fuzzy += sub.counts.fuzzy;
            agg.failing += sub.counts.failing;
        }
        agg
    }

    /// Look up a subproject by slug.
    pub fn subproject(&self, slug: &SubprojectSlug) -> Option<&Subproject> {
        self.subprojects.iter().find(|s| &s.slug == slug)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
