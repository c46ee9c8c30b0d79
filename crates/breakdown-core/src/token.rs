use crate::error::SourceError;

/// A positioned run of text as produced by the PDF backend.
///
/// Coordinates follow the pdfplumber convention: `x0` is the left edge and
/// `top` the distance from the top of the page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// The text content of this token.
    pub text: String,
    /// Left edge.
    pub x0: f64,
    /// Top edge (distance from top of page).
    pub top: f64,
}

impl Token {
    pub fn new(text: impl Into<String>, x0: f64, top: f64) -> Self {
        Self {
            text: text.into(),
            x0,
            top,
        }
    }
}

/// All tokens of a single page together with the page width.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageTokens {
    /// Page width in points.
    pub width: f64,
    /// Tokens in extraction order (no ordering is assumed).
    pub tokens: Vec<Token>,
}

impl PageTokens {
    pub fn new(width: f64, tokens: Vec<Token>) -> Self {
        Self { width, tokens }
    }

    /// Horizontal midpoint of the page.
    pub fn midpoint(&self) -> f64 {
        self.width / 2.0
    }
}

/// A document that yields positioned tokens page by page.
///
/// Implemented by the PDF backend and by JSON token dumps. Pages are
/// 0-indexed and must be returned in document order.
pub trait TokenSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Extract the tokens of page `index`.
    fn page_tokens(&self, index: usize) -> Result<PageTokens, SourceError>;
}

impl TokenSource for [PageTokens] {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page_tokens(&self, index: usize) -> Result<PageTokens, SourceError> {
        self.get(index)
            .cloned()
            .ok_or_else(|| SourceError::page_out_of_range(index, self.len()))
    }
}

impl TokenSource for Vec<PageTokens> {
    fn page_count(&self) -> usize {
        self.as_slice().page_count()
    }

    fn page_tokens(&self, index: usize) -> Result<PageTokens, SourceError> {
        self.as_slice().page_tokens(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_midpoint() {
        let page = PageTokens::new(600.0, Vec::new());
        assert_eq!(page.midpoint(), 300.0);
    }

    #[test]
    fn test_vec_source_page_out_of_range() {
        let pages = vec![PageTokens::new(100.0, vec![Token::new("a", 1.0, 2.0)])];
        assert_eq!(pages.page_count(), 1);
        assert_eq!(pages.page_tokens(0).unwrap().tokens.len(), 1);
        let err = pages.page_tokens(3).unwrap_err();
        assert!(err.to_string().contains("page 4"));
    }
}
