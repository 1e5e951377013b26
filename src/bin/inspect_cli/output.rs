//! Output formatting for the sui-replay-inspect CLI
//!
//! Provides human-readable and JSON output for a set of inspected files.

use serde::Serialize;
use std::path::Path;

use sui_replay_core::{render_text, ReplayError, ReplayOverview, TextOptions};

/// One inspected file, as emitted in JSON mode.
#[derive(Serialize)]
pub struct FileReport<'a> {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<&'a ReplayOverview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> FileReport<'a> {
    pub fn new(path: &Path, result: &'a Result<ReplayOverview, ReplayError>) -> Self {
        let file = path.display().to_string();
        match result {
            Ok(overview) => Self {
                file,
                overview: Some(overview),
                error: None,
            },
            Err(e) => Self {
                file,
                overview: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Format all file results as one JSON array
pub fn format_reports_json(reports: &[FileReport<'_>]) -> String {
    serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string())
}

/// Format one file result for display
pub fn format_report(
    path: &Path,
    result: &Result<ReplayOverview, ReplayError>,
    options: &TextOptions,
    with_header: bool,
) -> String {
    let mut out = String::new();
    if with_header {
        out.push_str(&bold(&format!("== {} ==", path.display()), options.color));
        out.push('\n');
    }
    match result {
        Ok(overview) => out.push_str(&render_text(overview, options)),
        Err(e) => out.push_str(&format_error(path, e, options.color)),
    }
    out
}

/// Format a file-level failure
pub fn format_error(path: &Path, error: &ReplayError, color: bool) -> String {
    let text = format!("✗ {}: {}", path.display(), error);
    if color {
        format!("\x1b[31m{}\x1b[0m\n", text)
    } else {
        format!("{}\n", text)
    }
}

fn bold(text: &str, color: bool) -> String {
    if color {
        format!("\x1b[1m{}\x1b[0m", text)
    } else {
        text.to_string()
    }
}
