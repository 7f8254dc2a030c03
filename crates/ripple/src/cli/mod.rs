//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `analyze`: Coarse impact classification for any operation
//! - `cancel`: Detailed cancellation impact
//! - `delete`: Detailed deletion impact
//! - `children`: List direct children of an artifact
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--data <FILE>`: Read artifacts from this JSONL file instead of discovering `.ripple/`
//! - `--fail-on-impact`: Exit with an error when the analyzed operation has impact
//!
//! # Example
//!
//! ```bash
//! ripple analyze A.1 --operation remove-dependency
//! ripple delete A.1.2 --fail-on-impact
//! ripple --json cancel B.1
//! ```

mod args;
mod execute;
mod validators;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{AnalyzeArgs, CancelArgs, ChildrenArgs, DeleteArgs};
pub use validators::{parse_operation, validate_artifact_id};

/// Ripple - impact analysis for hierarchical work artifacts
///
/// Reports what else is affected before you cancel, delete, or
/// remove a dependency from an artifact. Analysis is read-only.
#[derive(Parser, Debug)]
#[command(name = "ripple")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Artifact data file (JSONL); skips `.ripple/` discovery
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Exit with an error if the operation would affect other artifacts
    ///
    /// For `delete`, fails only when the deletion requires force.
    #[arg(long, global = true)]
    pub fail_on_impact: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Classify the artifacts affected by an operation
    ///
    /// Each affected artifact is listed once with its impact type and a reason.
    Analyze(AnalyzeArgs),

    /// Show the detailed impact of cancelling an artifact
    ///
    /// Covers parent completion, dependents unblocked, and children left as-is.
    Cancel(CancelArgs),

    /// Show the detailed impact of deleting an artifact
    ///
    /// Covers orphaned dependents and children, the parent losing a child,
    /// and its remaining siblings.
    Delete(DeleteArgs),

    /// List the direct children of an artifact
    Children(ChildrenArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::output::OutputMode;

        let Some(command) = &self.command else {
            println!("Ripple impact analysis");
            println!("Use --help for more information");
            return Ok(());
        };

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };
        let app = self.load_app().await?;

        match command {
            Commands::Analyze(args) => {
                execute::execute_analyze(&app, args, output_mode, self.fail_on_impact).await
            }
            Commands::Cancel(args) => {
                execute::execute_cancel(&app, args, output_mode, self.fail_on_impact).await
            }
            Commands::Delete(args) => {
                execute::execute_delete(&app, args, output_mode, self.fail_on_impact).await
            }
            Commands::Children(args) => execute::execute_children(&app, args, output_mode).await,
        }
    }

    async fn load_app(&self) -> Result<crate::app::App> {
        use crate::app::App;

        match &self.data {
            Some(path) => App::from_data_file(path)
                .await
                .with_context(|| format!("Failed to load artifacts from {}", path.display())),
            None => {
                let cwd = std::env::current_dir()?;
                Ok(App::from_directory(&cwd).await?)
            }
        }
    }
}
