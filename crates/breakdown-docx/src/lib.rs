//! breakdown-docx: DOCX table backend for breakdown-rs.
//!
//! Reads the first table of a Word document, replaces its body rows with a
//! freshly merged breakdown, scrubs legacy phrases, and writes the package
//! back with every other part untouched. Implements
//! [`breakdown_core::TableDocument`].

mod document;
mod error;
mod package;
mod xml;

pub use document::{DocxDocument, ROW_BORDER_COLOR, ROW_BORDER_SIZE, ROW_BORDER_STYLE};
pub use error::DocxError;
pub use package::DOCUMENT_PART;
