//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success:  green   (can complete, fully unblocked)
//!   - Warning:  yellow  (partial impact, remaining blockers)
//!   - Error:    red     (broken dependencies, force required)
//!   - Info:     cyan    (artifact IDs)
//!   - Muted:    dimmed  (reasons, messages)
//!   - Emphasis: bold    (section headers)

use crate::impact::ImpactType;
use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Colorize an artifact ID (cyan).
pub(crate) fn colorize_id(id: &str, config: &OutputConfig) -> String {
    info(id, config)
}

/// Color an impact type label by severity.
pub(crate) fn colorize_impact_type(impact_type: ImpactType, config: &OutputConfig) -> String {
    let text = impact_type.to_string();
    match impact_type {
        ImpactType::BreaksDependency => error(&text, config),
        ImpactType::BlocksParentCompletion | ImpactType::OrphansChildren => {
            warning(&text, config)
        }
    }
}

/// A pass/fail marker, with ASCII fallback support.
pub(crate) fn marker(ok: bool, config: &OutputConfig) -> String {
    let icon = match (ok, config.use_ascii) {
        (true, true) => "+",
        (false, true) => "!",
        (true, false) => "✓",
        (false, false) => "✗",
    };
    if ok {
        success(icon, config)
    } else {
        warning(icon, config)
    }
}
