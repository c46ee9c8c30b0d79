use breakdown_core::{OptionsError, SourceError};
use breakdown_docx::DocxError;
use thiserror::Error;

/// Errors that abort a breakdown run.
#[derive(Debug, Error)]
pub enum BreakdownError {
    /// The template document cannot be opened, is not a valid DOCX, or has
    /// no table. Raised before any output is produced.
    #[error("unreadable table document: {0}")]
    UnreadableTable(String),

    /// The schedule cannot be opened, or one of its pages cannot be read.
    #[error("cannot read schedule: {0}")]
    TokenSource(String),

    #[error("invalid options: {0}")]
    InvalidOptions(#[from] OptionsError),

    /// The merged document could not be serialized.
    #[error("cannot write output document: {0}")]
    WriteDocument(#[source] DocxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SourceError> for BreakdownError {
    fn from(err: SourceError) -> Self {
        BreakdownError::TokenSource(err.to_string())
    }
}
