//! The breakdown table inside `word/document.xml`.

use std::path::Path;

use breakdown_core::{BREAKDOWN_COLUMNS, BreakdownRow, TableDocument, scrub_text};
use tracing::{debug, trace};

use crate::error::DocxError;
use crate::package::{DOCUMENT_PART, Package};
use crate::xml::{Element, Node, XmlTree};

/// Border drawn under every generated row.
pub const ROW_BORDER_STYLE: &str = "single";
/// Border width in eighths of a point.
pub const ROW_BORDER_SIZE: &str = "24";
pub const ROW_BORDER_COLOR: &str = "000000";

/// Elements that may follow `w:tcPr` inside a cell.
const CELL_CONTENT: &[&str] = &[
    "w:p",
    "w:tbl",
    "w:sdt",
    "w:customXml",
    "w:altChunk",
    "w:bookmarkStart",
    "w:bookmarkEnd",
];

/// Elements that follow `w:tcBorders` inside `w:tcPr`.
const AFTER_CELL_BORDERS: &[&str] = &[
    "w:shd",
    "w:noWrap",
    "w:tcMar",
    "w:textDirection",
    "w:tcFitText",
    "w:vAlign",
    "w:hideMark",
    "w:headers",
    "w:cellIns",
    "w:cellDel",
    "w:cellMerge",
    "w:tcPrChange",
];

/// Elements that follow `w:bottom` inside `w:tcBorders`.
const AFTER_BOTTOM_BORDER: &[&str] = &[
    "w:end",
    "w:right",
    "w:insideH",
    "w:insideV",
    "w:tl2br",
    "w:tr2bl",
];

/// A Word document whose first body table holds a breakdown.
///
/// Only `word/document.xml` is parsed; every other package part is carried
/// through unchanged when the document is written back.
#[derive(Debug, Clone)]
pub struct DocxDocument {
    package: Package,
    tree: XmlTree,
}

impl DocxDocument {
    /// Open a document from the bytes of a `.docx` file.
    ///
    /// Fails with [`DocxError::NoTables`] when the body has no table.
    pub fn open(bytes: &[u8]) -> Result<Self, DocxError> {
        let package = Package::read(bytes)?;
        let xml = package
            .part(DOCUMENT_PART)
            .ok_or_else(|| DocxError::MissingPart(DOCUMENT_PART.to_string()))?;
        let tree = XmlTree::parse(xml)?;
        if tree.root().child("w:body").is_none() {
            return Err(DocxError::Malformed("document has no body".into()));
        }
        let doc = Self { package, tree };
        if doc.table_count() == 0 {
            return Err(DocxError::NoTables);
        }
        debug!(tables = doc.table_count(), "opened DOCX document");
        Ok(doc)
    }

    /// Open a document from a file on disk.
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self, DocxError> {
        let bytes = std::fs::read(path)?;
        Self::open(&bytes)
    }

    /// Number of top-level tables in the body.
    pub fn table_count(&self) -> usize {
        self.body()
            .map_or(0, |body| body.children_named("w:tbl").count())
    }

    /// Texts of the top-level body paragraphs.
    pub fn paragraph_texts(&self) -> Vec<String> {
        self.body().map_or_else(Vec::new, |body| {
            body.children_named("w:p").map(paragraph_text).collect()
        })
    }

    /// Serialize the document into `.docx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DocxError> {
        let mut package = self.package.clone();
        package.set_part(DOCUMENT_PART, self.tree.to_bytes()?);
        package.write()
    }

    fn body(&self) -> Option<&Element> {
        self.tree.root().child("w:body")
    }

    fn body_mut(&mut self) -> Option<&mut Element> {
        self.tree.root_mut().child_mut("w:body")
    }

    fn first_table(&self) -> Option<&Element> {
        self.body()?.child("w:tbl")
    }

    fn first_table_mut(&mut self) -> Option<&mut Element> {
        self.body_mut()?.child_mut("w:tbl")
    }
}

impl TableDocument for DocxDocument {
    /// One entry per grid column: a horizontally merged cell repeats its
    /// text across the columns it spans, and a vertical-merge continuation
    /// cell reads as the cell above it.
    fn table_rows(&self) -> Vec<Vec<String>> {
        let Some(table) = self.first_table() else {
            return Vec::new();
        };
        let mut rows: Vec<Vec<String>> = Vec::new();
        for tr in table.children_named("w:tr") {
            let mut cells = Vec::new();
            for tc in tr.children_named("w:tc") {
                let text = if continues_vertical_merge(tc) {
                    rows.last()
                        .and_then(|above| above.get(cells.len()))
                        .cloned()
                        .unwrap_or_default()
                } else {
                    cell_text(tc)
                };
                cells.extend(std::iter::repeat_n(text, grid_span(tc)));
            }
            rows.push(cells);
        }
        rows
    }

    fn replace_body_rows(&mut self, rows: &[BreakdownRow]) {
        let Some(table) = self.first_table_mut() else {
            return;
        };
        let columns = grid_columns(table);

        let mut kept_header = false;
        table.children.retain(|node| match node {
            Node::Element(e) if e.is("w:tr") => !std::mem::replace(&mut kept_header, true),
            _ => true,
        });

        for row in rows {
            let mut tr = new_row(&columns);
            let values = row.cells();
            for (i, tc) in tr.children_named_mut("w:tc").enumerate() {
                set_cell_text(tc, values.get(i).copied().unwrap_or(""));
            }
            style_row(&mut tr);
            table.push(tr);
        }
        debug!(rows = rows.len(), columns = columns.len(), "replaced table body rows");
    }

    fn scrub(&mut self) {
        let Some(body) = self.body_mut() else {
            return;
        };
        let mut changed = 0usize;
        for p in body.children_named_mut("w:p") {
            if let Some(clean) = scrub_text(&paragraph_text(p)) {
                set_paragraph_text(p, &clean);
                changed += 1;
            }
        }
        for table in body.children_named_mut("w:tbl") {
            for tr in table.children_named_mut("w:tr") {
                for tc in tr.children_named_mut("w:tc") {
                    if let Some(clean) = scrub_text(&cell_text(tc)) {
                        set_cell_text(tc, &clean);
                        changed += 1;
                    }
                }
            }
        }
        debug!(changed, "scrubbed document text");
    }
}

/// Widths of the table grid columns, one entry per column.
///
/// A table without a grid falls back to the header row's cell count, but
/// never fewer than [`BREAKDOWN_COLUMNS`] unsized columns.
fn grid_columns(table: &Element) -> Vec<Option<String>> {
    let grid: Vec<Option<String>> = table
        .child("w:tblGrid")
        .map(|g| g.children_named("w:gridCol").map(|c| c.attr("w:w")).collect())
        .unwrap_or_default();
    if !grid.is_empty() {
        return grid;
    }
    let header_cells = table
        .child("w:tr")
        .map_or(0, |tr| tr.children_named("w:tc").count());
    trace!(header_cells, "table has no grid");
    vec![None; header_cells.max(BREAKDOWN_COLUMNS)]
}

/// An empty row with one cell per grid column, each sized to its column.
fn new_row(columns: &[Option<String>]) -> Element {
    let mut tr = Element::new("w:tr");
    for width in columns {
        let mut tc = Element::new("w:tc");
        if let Some(width) = width {
            let mut tc_pr = Element::new("w:tcPr");
            tc_pr.push(
                Element::new("w:tcW")
                    .with_attr("w:w", width)
                    .with_attr("w:type", "dxa"),
            );
            tc.push(tc_pr);
        }
        tc.push(Element::new("w:p"));
        tr.push(tc);
    }
    tr
}

/// Clear cell shading and draw the heavy bottom border on every cell.
fn style_row(tr: &mut Element) {
    for tc in tr.children_named_mut("w:tc") {
        let tc_pr = tc.get_or_insert_child("w:tcPr", CELL_CONTENT);
        tc_pr.remove_children("w:shd");
        let borders = tc_pr.get_or_insert_child("w:tcBorders", AFTER_CELL_BORDERS);
        let bottom = borders.get_or_insert_child("w:bottom", AFTER_BOTTOM_BORDER);
        bottom.set_attr("w:val", ROW_BORDER_STYLE);
        bottom.set_attr("w:sz", ROW_BORDER_SIZE);
        bottom.set_attr("w:color", ROW_BORDER_COLOR);
    }
}

/// Visible text of a paragraph: run text with tabs and breaks.
fn paragraph_text(p: &Element) -> String {
    fn collect(e: &Element, out: &mut String) {
        for child in e.elements() {
            if child.is("w:t") {
                out.push_str(&child.inner_text());
            } else if child.is("w:tab") {
                out.push('\t');
            } else if child.is("w:br") || child.is("w:cr") {
                out.push('\n');
            } else if !(child.is("w:pPr") || child.is("w:rPr")) {
                collect(child, out);
            }
        }
    }
    let mut out = String::new();
    collect(p, &mut out);
    out
}

/// Number of grid columns a cell covers (`w:gridSpan`, at least 1).
fn grid_span(tc: &Element) -> usize {
    tc.child("w:tcPr")
        .and_then(|pr| pr.child("w:gridSpan"))
        .and_then(|span| span.attr("w:val"))
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(1)
        .max(1)
}

/// Whether a cell continues a vertical merge started in a row above.
fn continues_vertical_merge(tc: &Element) -> bool {
    tc.child("w:tcPr")
        .and_then(|pr| pr.child("w:vMerge"))
        .is_some_and(|merge| merge.attr("w:val").as_deref() != Some("restart"))
}

/// Cell text: its paragraphs joined with newlines.
fn cell_text(tc: &Element) -> String {
    tc.children_named("w:p")
        .map(paragraph_text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace a cell's content with a single paragraph holding `text`.
fn set_cell_text(tc: &mut Element, text: &str) {
    tc.children
        .retain(|node| matches!(node, Node::Element(e) if e.is("w:tcPr")));
    let mut p = Element::new("w:p");
    p.push(text_run(text));
    tc.push(p);
}

/// Replace a paragraph's runs with a single run holding `text`, keeping its
/// paragraph properties.
fn set_paragraph_text(p: &mut Element, text: &str) {
    p.children
        .retain(|node| matches!(node, Node::Element(e) if e.is("w:pPr")));
    p.push(text_run(text));
}

/// A run for `text`; tabs become `w:tab`, line breaks become `w:br`.
fn text_run(text: &str) -> Element {
    fn flush(run: &mut Element, pending: &mut String) {
        if pending.is_empty() {
            return;
        }
        let mut t = Element::new("w:t");
        if pending.starts_with(char::is_whitespace) || pending.ends_with(char::is_whitespace) {
            t.set_attr("xml:space", "preserve");
        }
        t.push_text(pending);
        run.push(t);
        pending.clear();
    }

    let mut run = Element::new("w:r");
    let mut pending = String::new();
    for ch in text.chars() {
        match ch {
            '\t' => {
                flush(&mut run, &mut pending);
                run.push(Element::new("w:tab"));
            }
            '\n' | '\r' => {
                flush(&mut run, &mut pending);
                run.push(Element::new("w:br"));
            }
            c => pending.push(c),
        }
    }
    flush(&mut run, &mut pending);
    run
}
