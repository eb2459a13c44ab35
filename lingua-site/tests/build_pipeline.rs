//! End-to-end build pipeline tests: catalog in, static site out.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use lingua_core::catalog::{save_glossary_at, save_project_at};
use lingua_core::types::{
    GlossaryEntry, GlossaryRef, LanguageCode, Permissions, Project, ProjectSlug, Subproject,
    SubprojectSlug, UnitCounts,
};
use lingua_site::{diff_site, hash_store, pipeline, BuildOptions, BuildScope, WriteResult};

fn seed_catalog(root: &Path) {
    let project = Project {
        slug: ProjectSlug::from("weblate"),
        name: "Weblate".to_string(),
        instructions: Some("Mind the glossary.".to_string()),
        web_url: Some("https://weblate.example.org".to_string()),
        subprojects: vec![
            Subproject {
                slug: SubprojectSlug::from("master"),
                name: "master".to_string(),
                counts: UnitCounts { total: 200, translated: 173, fuzzy: 12, failing: 3 },
            },
            Subproject {
                slug: SubprojectSlug::from("website"),
                name: "website".to_string(),
                counts: UnitCounts { total: 100, translated: 100, fuzzy: 0, failing: 0 },
            },
        ],
        glossaries: vec![GlossaryRef {
            language: LanguageCode::from("cs"),
            name: "Czech".to_string(),
        }],
        last_changes: vec![],
    };
    save_project_at(root, &project).expect("save project");
    save_glossary_at(
        root,
        &project.slug,
        &LanguageCode::from("cs"),
        &[GlossaryEntry { source: "branch".into(), target: "větev".into() }],
    )
    .expect("save glossary");
}

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

#[test]
fn full_build_writes_every_page_and_export() {
    let root = TempDir::new().expect("root");
    let out = TempDir::new().expect("out");
    seed_catalog(root.path());

    let result = pipeline::run(
        root.path(),
        BuildScope::All,
        &options(out.path().to_path_buf(), false),
    )
    .expect("build");

    // index, checks, project, glossaries, glossary cs, 2 stats exports
    assert_eq!(result.written(), 7);

    for rel in [
        "index.html",
        "checks/index.html",
        "projects/weblate/index.html",
        "dictionaries/weblate/index.html",
        "dictionaries/weblate/cs/index.html",
        "exports/stats/weblate/master/index.json",
        "exports/stats/weblate/website/index.json",
    ] {
        assert!(out.path().join(rel).exists(), "missing output: {rel}");
    }

    let stats = fs::read_to_string(
        out.path()
            .join("exports/stats/weblate/master/index.json"),
    )
    .expect("stats json");
    let value: serde_json::Value = serde_json::from_str(&stats).expect("valid JSON");
    assert_eq!(value["translated_percent"], 86.5);

    let glossary_page = fs::read_to_string(
        out.path()
            .join("dictionaries/weblate/cs/index.html"),
    )
    .expect("glossary page");
    assert!(glossary_page.contains("branch"));
    assert!(glossary_page.contains("větev"));
}

#[test]
fn rebuild_is_a_no_op() {
    let root = TempDir::new().expect("root");
    let out = TempDir::new().expect("out");
    seed_catalog(root.path());
    let opts = options(out.path().to_path_buf(), false);

    pipeline::run(root.path(), BuildScope::All, &opts).expect("first build");
    let second = pipeline::run(root.path(), BuildScope::All, &opts).expect("second build");

    assert_eq!(second.written(), 0);
    assert!(second.results.iter().all(|r| matches!(r, WriteResult::Unchanged { .. })));
}

#[test]
fn catalog_edit_rewrites_only_affected_pages() {
    let root = TempDir::new().expect("root");
    let out = TempDir::new().expect("out");
    seed_catalog(root.path());
    let opts = options(out.path().to_path_buf(), false);
    pipeline::run(root.path(), BuildScope::All, &opts).expect("first build");

    // Adding a glossary word touches the glossary page but not the exports.
    save_glossary_at(
        root.path(),
        &ProjectSlug::from("weblate"),
        &LanguageCode::from("cs"),
        &[
            GlossaryEntry { source: "branch".into(), target: "větev".into() },
            GlossaryEntry { source: "widget".into(), target: "pomůcka".into() },
        ],
    )
    .expect("save glossary");

    let result = pipeline::run(root.path(), BuildScope::All, &opts).expect("rebuild");
    let written: Vec<String> = result
        .results
        .iter()
        .filter(|r| matches!(r, WriteResult::Written { .. }))
        .map(|r| r.path().display().to_string())
        .collect();
    assert_eq!(written.len(), 1, "only the glossary page should change: {written:?}");
    assert!(written[0].ends_with("dictionaries/weblate/cs/index.html"));
}

#[test]
fn dry_run_writes_nothing_and_keeps_store() {
    let root = TempDir::new().expect("root");
    let out = TempDir::new().expect("out");
    seed_catalog(root.path());

    let result = pipeline::run(
        root.path(),
        BuildScope::All,
        &options(out.path().to_path_buf(), true),
    )
    .expect("dry run");

    assert!(result.would_write() > 0);
    assert_eq!(result.written(), 0);
    assert!(!out.path().join("index.html").exists());
    assert!(
        !hash_store::store_path_at(root.path()).exists(),
        "dry run must not create the hash store"
    );
}

#[test]
fn dry_run_after_build_does_not_advance_synced_at() {
    let root = TempDir::new().expect("root");
    let out = TempDir::new().expect("out");
    seed_catalog(root.path());
    let opts = options(out.path().to_path_buf(), false);
    pipeline::run(root.path(), BuildScope::All, &opts).expect("build");

    let before = hash_store::load_at(root.path()).expect("store").synced_at;
    pipeline::run(
        root.path(),
        BuildScope::All,
        &options(out.path().to_path_buf(), true),
    )
    .expect("dry run");
    let after = hash_store::load_at(root.path()).expect("store").synced_at;

    assert_eq!(before, after);
}

#[test]
fn diff_matches_what_a_rebuild_would_write() {
    let root = TempDir::new().expect("root");
    let out = TempDir::new().expect("out");
    seed_catalog(root.path());
    let opts = options(out.path().to_path_buf(), false);
    pipeline::run(root.path(), BuildScope::All, &opts).expect("build");

    let clean = diff_site(root.path(), BuildScope::All, &opts).expect("diff");
    assert!(clean.diffs.is_empty());

    fs::write(out.path().join("index.html"), "stale content\n").expect("clobber");
    let dirty = diff_site(root.path(), BuildScope::All, &opts).expect("diff");
    assert_eq!(dirty.diffs.len(), 1);
    assert!(dirty.diffs[0].path.ends_with("index.html"));
    assert!(dirty.diffs[0].unified_diff.contains("-stale content"));
}
