use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use breakdown::{ParseOptions, PdfTokenSource, TokenDump, TokenSource};

use crate::page_range::parse_page_range;

/// Print `err` to stderr as `Error: ...` and return exit code 1.
pub fn report(err: impl Display) -> i32 {
    eprintln!("Error: {err}");
    1
}

/// Open a schedule PDF with user-friendly error messages.
pub fn open_pdf(file: &Path) -> Result<PdfTokenSource, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }
    PdfTokenSource::open_file(file).map_err(report)
}

/// Open a schedule as a PDF, or as a JSON token dump when `tokens` is set.
pub fn open_schedule(file: &Path, tokens: bool) -> Result<Box<dyn TokenSource>, i32> {
    if !tokens {
        return Ok(Box::new(open_pdf(file)?));
    }
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }
    let dump = TokenDump::load(file).map_err(report)?;
    Ok(Box::new(dump))
}

/// Parse options for a cast split ratio given on the command line.
pub fn parse_options(cast_split: f64) -> Result<ParseOptions, i32> {
    let options = ParseOptions::with_cast_split(cast_split);
    options.validate().map_err(report)?;
    Ok(options)
}

/// Resolve an optional page range string into 0-indexed page indices.
///
/// If `pages` is `None`, returns all pages (0..page_count).
pub fn resolve_pages(pages: Option<&str>, page_count: usize) -> Result<Vec<usize>, i32> {
    match pages {
        Some(range) => parse_page_range(range, page_count).map_err(report),
        None => Ok((0..page_count).collect()),
    }
}

/// Fold a multi-line cell value onto one line for tabular output.
pub fn single_line(text: &str) -> String {
    text.replace('\n', " | ")
}

/// Escape a string for CSV output.
///
/// If the text contains commas, double quotes, or newlines, wraps it in
/// double quotes and escapes any internal double quotes by doubling them.
pub fn csv_escape(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Prints "Reading page N/M..." to stderr, but only when stderr is a
/// terminal.
pub struct ProgressReporter {
    total: usize,
    is_tty: bool,
}

impl ProgressReporter {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            is_tty: io::stderr().is_terminal(),
        }
    }

    /// Report progress for page `current` (1-indexed).
    pub fn report(&self, current: usize) {
        if self.is_tty {
            eprint!("\rReading page {}/{}...", current, self.total);
            let _ = io::stderr().flush();
        }
    }

    pub fn finish(&self) {
        if self.is_tty {
            eprint!("\r{}\r", " ".repeat(40));
            let _ = io::stderr().flush();
        }
    }
}
