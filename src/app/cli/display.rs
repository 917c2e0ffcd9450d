//! CLI display utilities for formatting output
//!
//! Formatting functions return strings so they can be tested without a
//! terminal; the command handlers decide where they are printed.

use crate::core::styles::StyleRole;
use crate::scanner::{FileAttributes, ScanOutcome};
use crate::service::{AnalysisReport, StatCategory};
use prettytable::{format, Cell, Row, Table};

/// Characters of a hash shown in the abbreviated history listing
pub const HASH_PREVIEW_LEN: usize = 12;

pub const NO_HISTORY_MESSAGE: &str = "No previous scans to show.";
pub const REPORT_UNAVAILABLE_MESSAGE: &str = "Scan results could not be retrieved.";
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Successful upload!";
pub const UPLOAD_FAILURE_MESSAGE: &str = "Failed upload!";
pub const NO_FLAGGED_ENGINES_MESSAGE: &str = "No engine flagged this file.";

pub fn format_attributes(attributes: &FileAttributes) -> String {
    format!(
        "Name: {}\nExtension: {}\nSize: {} KB",
        attributes.name,
        attributes.extension,
        attributes.size_kb()
    )
}

/// First [`HASH_PREVIEW_LEN`] characters followed by `...`
pub fn truncate_hash(hash: &str) -> String {
    match hash.char_indices().nth(HASH_PREVIEW_LEN) {
        Some((cut, _)) => format!("{}...", &hash[..cut]),
        None => hash.to_string(),
    }
}

pub fn format_history(entries: &[String], full: bool) -> String {
    if entries.is_empty() {
        return NO_HISTORY_MESSAGE.to_string();
    }

    entries
        .iter()
        .map(|hash| {
            if full {
                hash.clone()
            } else {
                truncate_hash(hash)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_submission(outcome: &ScanOutcome, use_color: bool) -> String {
    if outcome.is_success() {
        format!(
            "{}\nSHA-256: {}",
            StyleRole::Clean.paint(UPLOAD_SUCCESS_MESSAGE, use_color),
            outcome.hash
        )
    } else {
        StyleRole::Danger.paint(UPLOAD_FAILURE_MESSAGE, use_color)
    }
}

fn category_role(category: StatCategory) -> StyleRole {
    match category {
        StatCategory::Malicious => StyleRole::Danger,
        StatCategory::Suspicious => StyleRole::Warning,
        StatCategory::Harmless | StatCategory::Undetected => StyleRole::Clean,
        _ => StyleRole::Dim,
    }
}

/// Cell painted with `role`; `base` carries non-colour flags such as alignment
fn styled_cell(text: &str, role: StyleRole, use_color: bool, base: &str) -> Cell {
    let colour = role
        .to_prettytable_spec()
        .filter(|_| use_color)
        .unwrap_or_default();
    let spec = format!("{}{}", base, colour);
    if spec.is_empty() {
        Cell::new(text)
    } else {
        Cell::new(text).style_spec(&spec)
    }
}

fn header_cell(text: &str, use_color: bool) -> Cell {
    styled_cell(text, StyleRole::Header, use_color, "b")
}

/// Header lines describing the analysed file
pub fn format_report_summary(report: &AnalysisReport) -> String {
    let name = if report.display_name.is_empty() {
        "(unknown)"
    } else {
        report.display_name.as_str()
    };

    let mut lines = vec![format!("File: {}", name), format!("SHA-256: {}", report.hash)];
    if let Some(description) = &report.type_description {
        lines.push(format!("Type: {}", description));
    }
    if let Some(times) = report.times_submitted {
        lines.push(format!("Times submitted: {}", times));
    }
    if let Some(analysed) = report.last_analysis_time() {
        lines.push(format!(
            "Last analysis: {}",
            analysed.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    lines.push(format!(
        "Detections: {} / {}",
        report.stats.flagged(),
        report.stats.total()
    ));
    lines.join("\n")
}

/// One row per verdict category, in the fixed display order
pub fn stats_table(report: &AnalysisReport, use_color: bool) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(Row::new(vec![
        header_cell("Category", use_color),
        header_cell("Engines", use_color),
    ]));

    for (category, count) in report.stats.iter() {
        let role = category_role(category);
        table.add_row(Row::new(vec![
            styled_cell(&category.to_string(), role, use_color, ""),
            styled_cell(&count.to_string(), role, use_color, "r"),
        ]));
    }
    table
}

/// Engines that reported the file as malicious or suspicious
///
/// Returns `None` when no engine flagged it.
pub fn engines_table(report: &AnalysisReport, use_color: bool) -> Option<Table> {
    let mut flagged = report.flagged_engines().peekable();
    flagged.peek()?;

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(Row::new(vec![
        header_cell("Engine", use_color),
        header_cell("Category", use_color),
        header_cell("Result", use_color),
    ]));

    for verdict in flagged {
        let category = verdict.category.as_deref().unwrap_or_default();
        let role = if category == "malicious" {
            StyleRole::Danger
        } else {
            StyleRole::Warning
        };
        table.add_row(Row::new(vec![
            Cell::new(verdict.engine_name.as_deref().unwrap_or_default()),
            styled_cell(category, role, use_color, ""),
            Cell::new(verdict.result.as_deref().unwrap_or_default()),
        ]));
    }
    Some(table)
}

/// Print the report view: summary, stats table and optionally flagged engines
///
/// Tables go through `print_tty` so cell styles reach the terminal only when
/// colour is enabled.
pub fn print_report(
    report: &AnalysisReport,
    show_engines: bool,
    use_color: bool,
) -> std::io::Result<()> {
    println!("{}
", format_report_summary(report));
    stats_table(report, use_color).print_tty(use_color)?;

    if show_engines {
        println!();
        match engines_table(report, use_color) {
            Some(table) => {
                table.print_tty(use_color)?;
            }
            None => println!("{}", NO_FLAGGED_ENGINES_MESSAGE),
        }
    }
    Ok(())
}
