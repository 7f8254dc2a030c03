//! Command execution logic.

use anyhow::{Result, bail};
use std::io::{self, Write};

use super::args::{AnalyzeArgs, CancelArgs, ChildrenArgs, DeleteArgs};
use crate::app::App;
use crate::output::{self, OutputConfig, OutputMode};

/// Execute the analyze command
pub async fn execute_analyze(
    app: &App,
    args: &AnalyzeArgs,
    output_mode: OutputMode,
    fail_on_impact: bool,
) -> Result<()> {
    let report = app.analyzer().analyze(&args.id, args.operation).await?;
    output::print_impact_report(&report, output_mode)?;

    if fail_on_impact && report.has_impact {
        bail!(
            "{} of {} affects {} other artifact(s)",
            report.operation,
            report.artifact_id,
            report.impacted_artifacts.len()
        );
    }
    Ok(())
}

/// Execute the cancel command
pub async fn execute_cancel(
    app: &App,
    args: &CancelArgs,
    output_mode: OutputMode,
    fail_on_impact: bool,
) -> Result<()> {
    let report = app.analyzer().analyze_cancellation(&args.id).await?;
    output::print_cancellation_report(&report, output_mode)?;

    if fail_on_impact && report.has_impact {
        bail!("{}", report.summary);
    }
    Ok(())
}

/// Execute the delete command
///
/// With `--fail-on-impact`, only a deletion that requires force fails.
pub async fn execute_delete(
    app: &App,
    args: &DeleteArgs,
    output_mode: OutputMode,
    fail_on_impact: bool,
) -> Result<()> {
    let report = app.analyzer().analyze_deletion(&args.id).await?;
    output::print_deletion_report(&report, output_mode)?;

    if fail_on_impact && report.requires_force {
        bail!(
            "Deleting {} orphans {} dependent(s); deletion requires force",
            report.artifact_id,
            report.orphaned_dependents.len()
        );
    }
    Ok(())
}

/// Execute the children command
pub async fn execute_children(app: &App, args: &ChildrenArgs, output_mode: OutputMode) -> Result<()> {
    let children = app.analyzer().find_children_in_hierarchy(&args.id).await?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match output_mode {
        OutputMode::Json => output::print_json(&mut handle, &children)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            if children.is_empty() {
                writeln!(handle, "{} has no children", args.id)?;
            }
            for child in &children {
                let state = child
                    .current_state()
                    .map_or_else(|| "no events".to_string(), |s| s.to_string());
                match &child.title {
                    Some(title) => writeln!(
                        handle,
                        "{}  {}  {}",
                        output::info(child.id.as_str(), &config),
                        title,
                        state
                    )?,
                    None => writeln!(handle, "{}  {}", output::info(child.id.as_str(), &config), state)?,
                }
            }
        }
    }
    Ok(())
}
