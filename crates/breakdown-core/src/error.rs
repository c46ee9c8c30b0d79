//! Error and warning types for breakdown-core.
//!
//! Provides [`OptionsError`] for rejected configuration, [`SourceError`] for
//! token sources that cannot deliver a page, and [`ParseWarning`] for
//! non-fatal issues that let a run continue with degraded output.

use std::fmt;

/// A configuration value outside its accepted range.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionsError {
    /// The cast-column split ratio is outside `min..=max`.
    CastSplitOutOfRange { value: f64, min: f64, max: f64 },
    /// A rounding precision is larger than the supported number of decimals.
    PrecisionTooLarge { name: &'static str, value: u32, max: u32 },
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::CastSplitOutOfRange { value, min, max } => write!(
                f,
                "cast split ratio {value} is outside the accepted range {min}..={max}"
            ),
            OptionsError::PrecisionTooLarge { name, value, max } => {
                write!(f, "{name} of {value} decimals exceeds the maximum of {max}")
            }
        }
    }
}

impl std::error::Error for OptionsError {}

/// A token source failed to produce a page.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceError {
    /// Page index (0-based), when the failure is tied to one page.
    pub page: Option<usize>,
    /// Human-readable description from the backend.
    pub message: String,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            page: None,
            message: message.into(),
        }
    }

    pub fn on_page(page: usize, message: impl Into<String>) -> Self {
        Self {
            page: Some(page),
            message: message.into(),
        }
    }

    pub(crate) fn page_out_of_range(page: usize, count: usize) -> Self {
        Self::on_page(page, format!("document has only {count} page(s)"))
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page {
            Some(page) => write!(f, "page {}: {}", page + 1, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for SourceError {}

/// Machine-readable code for a [`ParseWarning`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "detail")
)]
pub enum WarningCode {
    /// The legend on page 1 was missing or yielded no roles.
    EmptyRoleMap,
    /// A header line no longer matched the header pattern when re-read.
    MalformedSceneToken,
    /// Any other warning not covered by specific variants.
    Other(String),
}

impl WarningCode {
    /// Returns the string tag for this warning code.
    pub fn as_str(&self) -> &str {
        match self {
            WarningCode::EmptyRoleMap => "EMPTY_ROLE_MAP",
            WarningCode::MalformedSceneToken => "MALFORMED_SCENE_TOKEN",
            WarningCode::Other(_) => "OTHER",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal issue encountered while parsing the schedule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseWarning {
    /// Machine-readable warning code.
    pub code: WarningCode,
    /// Human-readable description of the warning.
    pub description: String,
    /// Page number where the warning occurred (0-indexed), if applicable.
    pub page: Option<usize>,
}

impl ParseWarning {
    pub fn with_code(code: WarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            page: None,
        }
    }

    pub fn on_page(code: WarningCode, description: impl Into<String>, page: usize) -> Self {
        Self {
            code,
            description: description.into(),
            page: Some(page),
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(page) = self.page {
            write!(f, " (page {})", page + 1)?;
        }
        Ok(())
    }
}
