//! `lingua build` — render and write the static dashboard site.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use lingua_pages::MessageCatalog;
use lingua_site::{pipeline, BuildOptions, BuildScope, WriteResult};

use super::resolve_root;
use crate::{permissions_from, PermArg};

/// Arguments for `lingua build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Project slug to build (omit when using `--all`).
    pub project: Option<String>,

    /// Build every project in the catalog.
    #[arg(long, conflicts_with = "project")]
    pub all: bool,

    /// Output directory for the static site.
    #[arg(long, short = 'o', default_value = "site")]
    pub out: PathBuf,

    /// Site heading shown on every page.
    #[arg(long, default_value = "Lingua")]
    pub title: String,

    /// Viewer permission baked into the rendered pages (repeatable).
    #[arg(long = "allow", value_name = "PERM")]
    pub allow: Vec<PermArg>,

    /// YAML message catalog for translated labels.
    #[arg(long, value_name = "FILE")]
    pub messages: Option<PathBuf>,

    /// Directory of `.tera` templates overriding the embedded ones.
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Catalog root directory (defaults to ~/.lingua).
    #[arg(long)]
    pub root: Option<PathBuf>,
}

impl BuildArgs {
    pub fn run(self) -> Result<()> {
        let root = resolve_root(self.root)?;
        let scope = scope(self.project, self.all)?;
        let opts = build_options(
            self.title,
            self.out,
            &self.allow,
            self.messages,
            self.templates,
            self.dry_run,
        )?;

        let result = pipeline::run(&root, scope, &opts).context("build failed")?;
        print_results(&result.results, self.dry_run);
        Ok(())
    }
}

/// Resolve the positional slug and `--all` into a build scope.
pub(super) fn scope(project: Option<String>, all: bool) -> Result<BuildScope> {
    if all {
        return Ok(BuildScope::All);
    }
    let slug = project.context("provide a project slug or use --all")?;
    Ok(BuildScope::Project(slug))
}

/// Assemble [`BuildOptions`] shared by `build` and `diff`.
pub(super) fn build_options(
    title: String,
    out: PathBuf,
    allow: &[PermArg],
    messages: Option<PathBuf>,
    templates: Option<PathBuf>,
    dry_run: bool,
) -> Result<BuildOptions> {
    let messages = messages
        .as_deref()
        .map(MessageCatalog::load)
        .transpose()
        .context("failed to load message catalog")?;
    Ok(BuildOptions {
        site_title: title,
        out_dir: out,
        perms: permissions_from(allow),
        messages,
        user_template_dir: templates,
        dry_run,
    })
}

fn print_results(writes: &[WriteResult], dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let written = writes
        .iter()
        .filter(|r| {
            matches!(
                r,
                WriteResult::Written { .. } | WriteResult::WouldWrite { .. }
            )
        })
        .count();
    let unchanged = writes
        .iter()
        .filter(|r| matches!(r, WriteResult::Unchanged { .. }))
        .count();

    println!("{prefix}✓ site built ({written} written, {unchanged} unchanged)");
    for r in writes {
        match r {
            WriteResult::Written { path } => println!("  ✎  {}", path.display()),
            WriteResult::WouldWrite { path } => println!("  ~  {}", path.display()),
            WriteResult::Unchanged { path } => println!("  ·  {}", path.display()),
        }
    }
}
