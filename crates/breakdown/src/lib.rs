//! breakdown: Fill a makeup & SFX breakdown table from a shooting schedule.
//!
//! This is the public API facade crate for breakdown-rs. It re-exports types
//! from breakdown-core and wires a token source (a PDF through pdfplumber, or
//! a JSON token dump) and a DOCX template through the pipeline.
//!
//! # Architecture
//!
//! - **breakdown-core**: Backend-independent data types and algorithms
//! - **breakdown-docx**: DOCX table reading, row replacement, and scrubbing
//! - **breakdown** (this crate): Public API that ties everything together

mod error;
#[cfg(feature = "pdf")]
mod pdf;
mod pipeline;
mod tokens_json;

pub use breakdown_core;
pub use breakdown_docx;

pub use breakdown_core::{
    ChangeLogEntry, DEFAULT_CAST_SPLIT, Header, MAX_CAST_SPLIT, MIN_CAST_SPLIT, PageDiagnostics,
    PageTokens, ParseOptions, ParseWarning, RoleMap, SceneKey, SceneRecord, ScheduleParse,
    SourceError, Token, TokenSource, WarningCode,
};
pub use breakdown_docx::{DocxDocument, DocxError};
pub use error::BreakdownError;
#[cfg(feature = "pdf")]
pub use pdf::PdfTokenSource;
pub use pipeline::{
    BreakdownOutput, DEFAULT_OUTPUT_NAME, DIAGNOSTIC_PAGES, PREVIEW_ROWS, RunSummary, parse, run,
    run_with_template_file,
};
pub use tokens_json::TokenDump;
