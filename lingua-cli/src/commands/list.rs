//! `lingua list` — catalog overview with aggregate progress.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use lingua_core::{catalog, types::Project};

use super::resolve_root;

/// Arguments for `lingua list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,

    /// Catalog root directory (defaults to ~/.lingua).
    #[arg(long)]
    pub root: Option<PathBuf>,
}

impl ListArgs {
    pub fn run(self) -> Result<()> {
        let root = resolve_root(self.root)?;
        let projects =
            catalog::list_projects_at(&root).context("failed to load the project catalog")?;

        let rows: Vec<ProjectRow> = projects.iter().map(ProjectRow::from).collect();
        if self.json {
            print_json(&rows)?;
            return Ok(());
        }

        print_table(&rows);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
struct ProjectRow {
    slug: String,
    name: String,
    subprojects: usize,
    units: u64,
    translated_percent: f64,
    fuzzy_percent: f64,
    failing_percent: f64,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        let agg = project.aggregate_counts();
        ProjectRow {
            slug: project.slug.0.clone(),
            name: project.name.clone(),
            subprojects: project.subprojects.len(),
            units: agg.total,
            translated_percent: agg.translated_percent(),
            fuzzy_percent: agg.fuzzy_percent(),
            failing_percent: agg.failing_percent(),
        }
    }
}

#[derive(Serialize)]
struct ListJson<'a> {
    summary: ListSummaryJson,
    projects: &'a [ProjectRow],
}

#[derive(Serialize)]
struct ListSummaryJson {
    projects: usize,
    subprojects: usize,
    units: u64,
}

#[derive(Tabled)]
struct ListTableRow {
    #[tabled(rename = "")]
    indicator: String,
    #[tabled(rename = "project")]
    project: String,
    #[tabled(rename = "subprojects")]
    subprojects: usize,
    #[tabled(rename = "units")]
    units: u64,
    #[tabled(rename = "translated")]
    translated: String,
    #[tabled(rename = "fuzzy")]
    fuzzy: String,
    #[tabled(rename = "failing")]
    failing: String,
}

fn print_json(rows: &[ProjectRow]) -> Result<()> {
    let payload = ListJson {
        summary: ListSummaryJson {
            projects: rows.len(),
            subprojects: rows.iter().map(|r| r.subprojects).sum(),
            units: rows.iter().map(|r| r.units).sum(),
        },
        projects: rows,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize list JSON")?
    );
    Ok(())
}

fn print_table(rows: &[ProjectRow]) {
    println!(
        "Lingua v{} | {} projects | {} subprojects",
        env!("CARGO_PKG_VERSION"),
        rows.len(),
        rows.iter().map(|r| r.subprojects).sum::<usize>(),
    );

    if rows.is_empty() {
        println!("No projects in the catalog. Run `lingua init` first.");
        return;
    }

    let table_rows: Vec<ListTableRow> = rows
        .iter()
        .map(|row| ListTableRow {
            indicator: progress_indicator(row.translated_percent),
            project: format!("{} ({})", row.name, row.slug),
            subprojects: row.subprojects,
            units: row.units,
            translated: format!("{:.1}%", row.translated_percent),
            fuzzy: format!("{:.1}%", row.fuzzy_percent),
            failing: format!("{:.1}%", row.failing_percent),
        })
        .collect();
    let mut table = Table::new(table_rows);
    table.with(Style::rounded());
    println!("{table}");
}

fn progress_indicator(translated_percent: f64) -> String {
    if translated_percent >= 90.0 {
        "■".green().bold().to_string()
    } else if translated_percent >= 50.0 {
        "■".yellow().bold().to_string()
    } else {
        "■".red().bold().to_string()
    }
}
