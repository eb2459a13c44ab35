//! `lingua init <slug> --name <name>`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use lingua_core::{catalog, types::ProjectSlug};

use super::resolve_root;

/// Register a new project in the catalog.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// URL slug for the new project (e.g. "weblate").
    pub slug: String,

    /// Human-readable project name.
    #[arg(long, short = 'n')]
    pub name: String,

    /// Catalog root directory (defaults to ~/.lingua).
    #[arg(long)]
    pub root: Option<PathBuf>,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let root = resolve_root(self.root)?;
        let project =
            catalog::init_project_at(&root, ProjectSlug::from(self.slug.as_str()), self.name)
                .with_context(|| format!("failed to register project '{}'", self.slug))?;

        println!("✓ Registered project '{}'", project.slug);
        println!(
            "  Saved to: {}",
            catalog::project_path_at(&root, &project.slug).display()
        );
        Ok(())
    }
}
