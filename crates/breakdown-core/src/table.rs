//! The tabular document a breakdown is written into.

use crate::merge::{BreakdownRow, ChangeLogEntry, ExistingAnnotations, merge_records};
use crate::scene::SceneRecord;

/// A document holding the breakdown table.
///
/// Implemented by the DOCX backend. The breakdown lives in the document's
/// first table; row 0 of that table is a header row and is never replaced.
pub trait TableDocument {
    /// Cell texts of every row of the first table, header row included.
    fn table_rows(&self) -> Vec<Vec<String>>;

    /// Replace every row after the header with `rows`, one table row each.
    fn replace_body_rows(&mut self, rows: &[BreakdownRow]);

    /// Remove stray legacy phrases and collapse repeated commas in every
    /// paragraph and table cell.
    fn scrub(&mut self);
}

/// Merge `records` into `document` and return the change log.
///
/// Annotations are read from the document before its body rows are
/// replaced; the scrub pass runs last.
pub fn apply_breakdown<D: TableDocument + ?Sized>(
    document: &mut D,
    records: &[SceneRecord],
) -> Vec<ChangeLogEntry> {
    let existing = ExistingAnnotations::from_table_rows(&document.table_rows());
    let merged = merge_records(records, &existing);
    document.replace_body_rows(&merged.rows);
    document.scrub();
    merged.changelog
}
