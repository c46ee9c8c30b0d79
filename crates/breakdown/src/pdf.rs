//! Schedule tokens from a PDF, extracted with pdfplumber.

use std::path::Path;

use breakdown_core::{PageTokens, SourceError, Token, TokenSource};
use pdfplumber::{Pdf, WordOptions};
use tracing::debug;

use crate::error::BreakdownError;

/// A PDF whose words become schedule tokens.
///
/// Words are grouped with pdfplumber's default tolerances; each word's left
/// edge and top become the token's `x0` and `top`.
pub struct PdfTokenSource {
    pdf: Pdf,
    words: WordOptions,
}

impl PdfTokenSource {
    pub fn open(bytes: &[u8]) -> Result<Self, BreakdownError> {
        let pdf = Pdf::open(bytes, None)
            .map_err(|e| BreakdownError::TokenSource(format!("failed to open PDF: {e}")))?;
        Ok(Self::from_pdf(pdf))
    }

    pub fn open_file(path: impl AsRef<Path>) -> Result<Self, BreakdownError> {
        let path = path.as_ref();
        let pdf = Pdf::open_file(path, None).map_err(|e| {
            BreakdownError::TokenSource(format!("failed to open PDF {}: {e}", path.display()))
        })?;
        Ok(Self::from_pdf(pdf))
    }

    fn from_pdf(pdf: Pdf) -> Self {
        debug!(pages = pdf.page_count(), "opened schedule PDF");
        Self {
            pdf,
            words: WordOptions::default(),
        }
    }
}

impl TokenSource for PdfTokenSource {
    fn page_count(&self) -> usize {
        self.pdf.page_count()
    }

    fn page_tokens(&self, index: usize) -> Result<PageTokens, SourceError> {
        let page = self
            .pdf
            .page(index)
            .map_err(|e| SourceError::on_page(index, e.to_string()))?;
        let tokens: Vec<Token> = page
            .extract_words(&self.words)
            .into_iter()
            .map(|w| Token::new(w.text, w.bbox.x0, w.bbox.top))
            .collect();
        debug!(page = index + 1, tokens = tokens.len(), "extracted page words");
        Ok(PageTokens::new(page.width(), tokens))
    }
}
