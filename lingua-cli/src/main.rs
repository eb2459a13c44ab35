//! Lingua — static translation dashboard CLI.
//!
//! # Usage
//!
//! ```text
//! lingua init <slug> --name <name>
//! lingua list [--json]
//! lingua build <project> [--out <dir>] [--dry-run] [--allow <perm>]...
//! lingua build --all [--out <dir>] [--dry-run]
//! lingua diff <project>|--all [--out <dir>]
//! lingua export glossary <project> <lang>
//! lingua export stats <project> <subproject>
//! ```

mod commands;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    build::BuildArgs, diff::DiffArgs, export::ExportCommand, init::InitArgs, list::ListArgs,
};
use lingua_core::types::Permissions;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "lingua",
    version,
    about = "Build a static dashboard site for translation projects",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a new project in the catalog.
    Init(InitArgs),

    /// List catalog projects with aggregate progress.
    List(ListArgs),

    /// Render and write the static dashboard site.
    Build(BuildArgs),

    /// Show unified diff of what build would write.
    Diff(DiffArgs),

    /// Print glossary CSV or subproject statistics JSON on stdout.
    Export {
        #[command(subcommand)]
        command: ExportCommand,
    },
}

// ---------------------------------------------------------------------------
// Shared permission argument — parsed from CLI strings, folds into core type
// ---------------------------------------------------------------------------

/// One viewer capability named on the command line via `--allow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermArg {
    CommitTranslation,
    UpdateTranslation,
    AddGlossary,
    ChangeGlossary,
    DeleteGlossary,
    UploadGlossary,
}

impl FromStr for PermArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "commit-translation" => Ok(Self::CommitTranslation),
            "update-translation" => Ok(Self::UpdateTranslation),
            "add-glossary" => Ok(Self::AddGlossary),
            "change-glossary" => Ok(Self::ChangeGlossary),
            "delete-glossary" => Ok(Self::DeleteGlossary),
            "upload-glossary" => Ok(Self::UploadGlossary),
            other => Err(format!(
                "unknown permission '{other}'; expected: commit-translation, \
                 update-translation, add-glossary, change-glossary, \
                 delete-glossary, upload-glossary"
            )),
        }
    }
}

impl fmt::Display for PermArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CommitTranslation => "commit-translation",
            Self::UpdateTranslation => "update-translation",
            Self::AddGlossary => "add-glossary",
            Self::ChangeGlossary => "change-glossary",
            Self::DeleteGlossary => "delete-glossary",
            Self::UploadGlossary => "upload-glossary",
        };
        f.write_str(name)
    }
}

/// Fold repeated `--allow` flags into a [`Permissions`] value.
pub fn permissions_from(args: &[PermArg]) -> Permissions {
    let mut perms = Permissions::none();
    for arg in args {
        match arg {
            PermArg::CommitTranslation => perms.commit_translation = true,
            PermArg::UpdateTranslation => perms.update_translation = true,
            PermArg::AddGlossary => perms.add_glossary = true,
            PermArg::ChangeGlossary => perms.change_glossary = true,
            PermArg::DeleteGlossary => perms.delete_glossary = true,
            PermArg::UploadGlossary => perms.upload_glossary = true,
        }
    }
    perms
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::List(args) => args.run(),
        Commands::Build(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::Export { command } => commands::export::run(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perm_arg_parses_both_separators() {
        assert_eq!(
            "commit-translation".parse::<PermArg>().unwrap(),
            PermArg::CommitTranslation
        );
        assert_eq!(
            "upload_glossary".parse::<PermArg>().unwrap(),
            PermArg::UploadGlossary
        );
        assert!("admin".parse::<PermArg>().is_err());
    }

    #[test]
    fn permissions_fold_sets_only_named_flags() {
        let perms = permissions_from(&[PermArg::UpdateTranslation, PermArg::AddGlossary]);
        assert!(perms.update_translation);
        assert!(perms.add_glossary);
        assert!(!perms.commit_translation);
        assert!(perms.may_maintain_repo());
    }
}
