//! `lingua diff` — show unified diffs of what build would write.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use lingua_site::diff_site;

use super::build::{build_options, scope};
use super::resolve_root;
use crate::PermArg;

/// Arguments for `lingua diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Project slug to diff (omit when using `--all`).
    pub project: Option<String>,

    /// Diff every project in the catalog.
    #[arg(long, conflicts_with = "project")]
    pub all: bool,

    /// Output directory the site was built into.
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

    /// Catalog root directory (defaults to ~/.lingua).
    #[arg(long)]
    pub root: Option<PathBuf>,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let root = resolve_root(self.root)?;
        let scope = scope(self.project, self.all)?;
        let opts = build_options(
            self.title,
            self.out,
            &self.allow,
            self.messages,
            self.templates,
            true,
        )?;

        let result = diff_site(&root, scope, &opts).context("diff failed")?;

        if result.diffs.is_empty() {
            println!("Site is up to date.");
            return Ok(());
        }

        for diff in result.diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }

        Ok(())
    }
}
