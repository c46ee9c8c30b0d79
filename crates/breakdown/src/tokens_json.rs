//! JSON token dumps: a schedule's positioned tokens saved to disk.
//!
//! A dump reproduces a run without the PDF backend:
//! `{"pages":[{"width":595.0,"tokens":[{"text":"1","x0":20.0,"top":100.0}]}]}`.

use std::path::Path;

use breakdown_core::{PageTokens, SourceError, TokenSource};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::BreakdownError;

/// Positioned tokens of every page of a schedule, in page order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenDump {
    pub pages: Vec<PageTokens>,
}

impl TokenDump {
    pub fn from_json(json: &str) -> Result<Self, BreakdownError> {
        serde_json::from_str(json)
            .map_err(|e| BreakdownError::TokenSource(format!("invalid token dump: {e}")))
    }

    pub fn to_json(&self) -> Result<String, BreakdownError> {
        serde_json::to_string_pretty(self).map_err(|e| BreakdownError::Io(e.into()))
    }

    /// Load a dump written by [`TokenDump::save`] or `breakdown tokens`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BreakdownError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            BreakdownError::TokenSource(format!("{}: {e}", path.display()))
        })?;
        let dump = Self::from_json(&json)?;
        debug!(path = %path.display(), pages = dump.pages.len(), "loaded token dump");
        Ok(dump)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BreakdownError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl TokenSource for TokenDump {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_tokens(&self, index: usize) -> Result<PageTokens, SourceError> {
        self.pages.as_slice().page_tokens(index)
    }
}
