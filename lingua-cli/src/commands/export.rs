//! `lingua export` — glossary CSV and subproject statistics on stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use lingua_core::{
    catalog,
    types::{LanguageCode, ProjectSlug, SubprojectSlug},
};
use lingua_export::{glossary_csv, stats_json};

use super::resolve_root;

#[derive(Subcommand, Debug)]
pub enum ExportCommand {
    /// Print a glossary word list as CSV.
    Glossary(GlossaryArgs),

    /// Print subproject statistics as JSON.
    Stats(StatsArgs),
}

/// Arguments for `lingua export glossary`.
#[derive(Args, Debug)]
pub struct GlossaryArgs {
    /// Project slug.
    pub project: String,

    /// Glossary language code (e.g. "cs").
    pub lang: String,

    /// Catalog root directory (defaults to ~/.lingua).
    #[arg(long)]
    pub root: Option<PathBuf>,
}

/// Arguments for `lingua export stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Project slug.
    pub project: String,

    /// Subproject slug.
    pub subproject: String,

    /// Catalog root directory (defaults to ~/.lingua).
    #[arg(long)]
    pub root: Option<PathBuf>,
}

pub fn run(command: ExportCommand) -> Result<()> {
    match command {
        ExportCommand::Glossary(args) => {
            let root = resolve_root(args.root)?;
            let slug = ProjectSlug::from(args.project.as_str());
            // A missing glossary file is a legitimate empty export, so the
            // project itself is checked first.
            catalog::load_project_at(&root, &slug)
                .with_context(|| format!("unknown project '{}'", args.project))?;
            let words =
                catalog::load_glossary_at(&root, &slug, &LanguageCode::from(args.lang.as_str()))?;
            print!("{}", glossary_csv(&words)?);
            Ok(())
        }
        ExportCommand::Stats(args) => {
            let root = resolve_root(args.root)?;
            let project =
                catalog::load_project_at(&root, &ProjectSlug::from(args.project.as_str()))
                    .with_context(|| format!("unknown project '{}'", args.project))?;
            let json = stats_json(&project, &SubprojectSlug::from(args.subproject.as_str()))
                .with_context(|| {
                    format!(
                        "stats export failed for '{}/{}'",
                        args.project, args.subproject
                    )
                })?;
            println!("{json}");
            Ok(())
        }
    }
}
