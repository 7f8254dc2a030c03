//! Output formatting for CLI commands.
//!
//! Reports render either as human-readable text or as pretty-printed JSON
//! (camelCase fields, the same shape the library returns).
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors, markers)

pub mod color;

use crate::impact::{CancellationImpactReport, DeletionImpactReport, ImpactReport};
use serde::Serialize;
use std::env;
use std::io::{self, Write};

pub use color::{error, info, success, warning};

use color::{bold, colorize_id, colorize_impact_type, dimmed, marker};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use ASCII-only markers instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with explicit values.
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `RIPPLE_MAX_WIDTH`: Maximum content width (default: 80)
    /// - `RIPPLE_ASCII`: Set to "1" or "true" for ASCII-only markers (default: false)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `RIPPLE_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let max_width = match lookup("RIPPLE_MAX_WIDTH") {
            Some(s) if !s.is_empty() => match s.parse() {
                Ok(width) => width,
                Err(_) => {
                    tracing::warn!(
                        env_var = "RIPPLE_MAX_WIDTH",
                        value = %s,
                        default = DEFAULT_MAX_CONTENT_WIDTH,
                        "Invalid value, using default"
                    );
                    DEFAULT_MAX_CONTENT_WIDTH
                }
            },
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let use_ascii = match lookup("RIPPLE_ASCII") {
            Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Some(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Some(v) => {
                tracing::warn!(
                    env_var = "RIPPLE_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            None => false,
        };

        // Respect NO_COLOR standard (https://no-color.org/)
        let use_colors = lookup("NO_COLOR").is_none()
            && lookup("RIPPLE_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH as usize)
}

fn content_width(config: &OutputConfig) -> usize {
    get_terminal_width().min(config.max_width).max(20)
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    textwrap::wrap(text, max_width)
        .into_iter()
        .map(|s| s.into_owned())
        .collect()
}

/// Write an indented, wrapped message line.
fn write_message<W: Write>(
    w: &mut W,
    indent: usize,
    text: &str,
    width: usize,
    config: &OutputConfig,
) -> io::Result<()> {
    let pad = " ".repeat(indent);
    for line in wrap_text(text, width.saturating_sub(indent)) {
        writeln!(w, "{pad}{}", dimmed(&line, config))?;
    }
    Ok(())
}

fn write_section_title<W: Write>(w: &mut W, title: &str, config: &OutputConfig) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "{}:", bold(title, config))
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Serialize any value as pretty JSON followed by a newline.
pub fn print_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, value).map_err(io::Error::other)?;
    writeln!(w)
}

/// Print a coarse impact report in the specified format.
pub fn print_impact_report(report: &ImpactReport, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => write_impact_text(&mut handle, report, &OutputConfig::from_env()),
        OutputMode::Json => print_json(&mut handle, report),
    }
}

/// Print a cancellation report in the specified format.
pub fn print_cancellation_report(
    report: &CancellationImpactReport,
    mode: OutputMode,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => write_cancellation_text(&mut handle, report, &OutputConfig::from_env()),
        OutputMode::Json => print_json(&mut handle, report),
    }
}

/// Print a deletion report in the specified format.
pub fn print_deletion_report(report: &DeletionImpactReport, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => write_deletion_text(&mut handle, report, &OutputConfig::from_env()),
        OutputMode::Json => print_json(&mut handle, report),
    }
}

// ============================================================================
// Text Rendering
// ============================================================================

pub(crate) fn write_impact_text<W: Write>(
    w: &mut W,
    report: &ImpactReport,
    config: &OutputConfig,
) -> io::Result<()> {
    let width = content_width(config);
    writeln!(
        w,
        "{} {} on {}",
        bold("Impact of", config),
        report.operation,
        colorize_id(report.artifact_id.as_str(), config)
    )?;

    if !report.has_impact {
        writeln!(w, "  {} No other artifacts affected", marker(true, config))?;
        return Ok(());
    }

    for impacted in &report.impacted_artifacts {
        writeln!(
            w,
            "  {} {}  {}",
            marker(false, config),
            colorize_id(impacted.id.as_str(), config),
            colorize_impact_type(impacted.impact_type, config)
        )?;
        write_message(w, 6, &impacted.reason, width, config)?;
    }
    Ok(())
}

pub(crate) fn write_cancellation_text<W: Write>(
    w: &mut W,
    report: &CancellationImpactReport,
    config: &OutputConfig,
) -> io::Result<()> {
    let width = content_width(config);
    for line in wrap_text(&report.summary, width) {
        writeln!(w, "{}", bold(&line, config))?;
    }

    if !report.parent_completion_affected.is_empty() {
        write_section_title(w, "Parent completion", config)?;
        for parent in &report.parent_completion_affected {
            writeln!(
                w,
                "  {} {}",
                marker(parent.can_complete, config),
                colorize_id(parent.id.as_str(), config)
            )?;
            write_message(w, 6, &parent.message, width, config)?;
        }
    }

    if !report.dependents_unblocked.is_empty() {
        write_section_title(w, "Dependents unblocked", config)?;
        for dependent in &report.dependents_unblocked {
            writeln!(
                w,
                "  {} {}",
                marker(dependent.fully_unblocked, config),
                colorize_id(dependent.id.as_str(), config)
            )?;
            write_message(w, 6, &dependent.message, width, config)?;
        }
    }

    if !report.children.is_empty() {
        write_section_title(w, "Children", config)?;
        for child in &report.children {
            let state = child
                .artifact
                .current_state()
                .map_or_else(|| "no events".to_string(), |s| s.to_string());
            writeln!(
                w,
                "  {} {}",
                colorize_id(child.id.as_str(), config),
                dimmed(&format!("({state})"), config)
            )?;
        }
    }
    Ok(())
}

pub(crate) fn write_deletion_text<W: Write>(
    w: &mut W,
    report: &DeletionImpactReport,
    config: &OutputConfig,
) -> io::Result<()> {
    let width = content_width(config);
    for line in wrap_text(&report.summary, width) {
        writeln!(w, "{}", bold(&line, config))?;
    }

    if !report.orphaned_dependents.is_empty() {
        write_section_title(w, "Orphaned dependents", config)?;
        for dependent in &report.orphaned_dependents {
            writeln!(
                w,
                "  {} {}",
                marker(!dependent.fully_orphaned, config),
                colorize_id(dependent.id.as_str(), config)
            )?;
            write_message(w, 6, &dependent.message, width, config)?;
        }
    }

    if let Some(parent) = &report.broken_parent {
        write_section_title(w, "Parent", config)?;
        writeln!(w, "  {}", colorize_id(parent.id.as_str(), config))?;
        write_message(w, 6, &parent.message, width, config)?;
    }

    if !report.affected_siblings.is_empty() {
        write_section_title(w, "Siblings", config)?;
        for sibling in &report.affected_siblings {
            writeln!(
                w,
                "  {} {}",
                marker(sibling.can_help_complete, config),
                colorize_id(sibling.id.as_str(), config)
            )?;
            write_message(w, 6, &sibling.message, width, config)?;
        }
    }

    if !report.orphaned_children.is_empty() {
        write_section_title(w, "Orphaned children", config)?;
        for child in &report.orphaned_children {
            writeln!(w, "  {}", colorize_id(child.id.as_str(), config))?;
            write_message(w, 6, &child.message, width, config)?;
        }
    }

    if report.requires_force {
        writeln!(w)?;
        writeln!(
            w,
            "{}",
            error("Deletion orphans dependents and requires --force", config)
        )?;
    }
    Ok(())
}
