//! The end-to-end run: schedule tokens plus template table in, filled
//! breakdown document out.

use std::path::Path;

use breakdown_core::{
    ChangeLogEntry, PageDiagnostics, ParseOptions, ScheduleParse, SceneRecord, TokenSource,
    apply_breakdown, parse_schedule,
};
use breakdown_docx::DocxDocument;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::BreakdownError;

/// Output file name used when none is given.
pub const DEFAULT_OUTPUT_NAME: &str = "Breakdown_filled_EP1.docx";
/// Number of parsed rows shown as a preview.
pub const PREVIEW_ROWS: usize = 15;
/// Number of pages covered by diagnostics output.
pub const DIAGNOSTIC_PAGES: usize = 3;

/// Counts reported after a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub role_count: usize,
    pub parsed_rows: usize,
    pub changes_detected: usize,
    pub cast_split_ratio: f64,
}

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct BreakdownOutput {
    /// The filled `.docx` file.
    pub document: Vec<u8>,
    pub changelog: Vec<ChangeLogEntry>,
    pub schedule: ScheduleParse,
    pub summary: RunSummary,
}

impl BreakdownOutput {
    /// Change log entries as `ADDED (day, scene)` / `REMOVED (day, scene)`.
    pub fn changelog_lines(&self) -> Vec<String> {
        self.changelog.iter().map(ToString::to_string).collect()
    }

    /// The first [`PREVIEW_ROWS`] parsed records.
    pub fn preview(&self) -> &[SceneRecord] {
        let records = &self.schedule.records;
        &records[..records.len().min(PREVIEW_ROWS)]
    }

    /// Diagnostics of the first [`DIAGNOSTIC_PAGES`] pages.
    pub fn diagnostics(&self) -> &[PageDiagnostics] {
        let pages = &self.schedule.pages;
        &pages[..pages.len().min(DIAGNOSTIC_PAGES)]
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BreakdownError> {
        std::fs::write(path, &self.document)?;
        Ok(())
    }
}

/// Parse a schedule with validated options.
pub fn parse<S: TokenSource + ?Sized>(
    source: &S,
    options: &ParseOptions,
) -> Result<ScheduleParse, BreakdownError> {
    options.validate()?;
    let schedule = parse_schedule(source, options)?;
    for warning in &schedule.warnings {
        warn!(%warning, "schedule parsed with degradation");
    }
    Ok(schedule)
}

/// Fill the first table of `template` from the scenes of `source`.
///
/// The template is opened before the schedule is read, so an unreadable
/// template aborts the run without doing any parsing.
pub fn run<S: TokenSource + ?Sized>(
    source: &S,
    template: &[u8],
    options: &ParseOptions,
) -> Result<BreakdownOutput, BreakdownError> {
    options.validate()?;
    let mut document = DocxDocument::open(template)
        .map_err(|e| BreakdownError::UnreadableTable(e.to_string()))?;
    let schedule = parse(source, options)?;

    let changelog = apply_breakdown(&mut document, &schedule.records);
    let document = document.to_bytes().map_err(BreakdownError::WriteDocument)?;

    let summary = RunSummary {
        role_count: schedule.roles.len(),
        parsed_rows: schedule.records.len(),
        changes_detected: changelog.len(),
        cast_split_ratio: options.cast_split_ratio,
    };
    info!(
        roles = summary.role_count,
        rows = summary.parsed_rows,
        changes = summary.changes_detected,
        "breakdown complete"
    );
    Ok(BreakdownOutput {
        document,
        changelog,
        schedule,
        summary,
    })
}

/// [`run`] with the template read from `template_path`.
pub fn run_with_template_file<S: TokenSource + ?Sized>(
    source: &S,
    template_path: impl AsRef<Path>,
    options: &ParseOptions,
) -> Result<BreakdownOutput, BreakdownError> {
    let path = template_path.as_ref();
    let template = std::fs::read(path)
        .map_err(|e| BreakdownError::UnreadableTable(format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), bytes = template.len(), "read template");
    run(source, &template, options)
}
