use thiserror::Error;

/// Errors raised while reading or writing a DOCX package.
#[derive(Debug, Error)]
pub enum DocxError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing package part: {0}")]
    MissingPart(String),

    #[error("malformed document part: {0}")]
    Malformed(String),

    #[error("document contains no tables")]
    NoTables,
}
