//! Page and document driver: tokens in, scene records out.

use tracing::{debug, warn};

use crate::error::{ParseWarning, SourceError, WarningCode};
use crate::headers::{Header, detect_headers};
use crate::lines::{Line, group_tokens_into_lines};
use crate::options::ParseOptions;
use crate::roles::{RoleMap, RoleResolver};
use crate::scene::{SceneRecord, parse_scene_block};
use crate::token::{PageTokens, TokenSource};

/// Number of line texts kept per page for diagnostics.
pub const DIAGNOSTIC_LINES: usize = 40;

/// What the parser saw on one page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageDiagnostics {
    /// Page number (1-based).
    pub page: usize,
    /// The first [`DIAGNOSTIC_LINES`] reconstructed line texts.
    pub lines: Vec<String>,
    /// All detected headers.
    pub headers: Vec<Header>,
}

/// Scene records of one page plus what went into them.
#[derive(Debug, Clone, PartialEq)]
pub struct PageScenes {
    pub records: Vec<SceneRecord>,
    pub diagnostics: PageDiagnostics,
    pub warnings: Vec<ParseWarning>,
}

/// Parse every scene on one page.
///
/// Each header's block runs up to the next header, or to the end of the page
/// for the last one. A page without headers yields no records.
pub fn extract_page_scenes<R: RoleResolver + ?Sized>(
    page_index: usize,
    page: &PageTokens,
    roles: &R,
    options: &ParseOptions,
) -> PageScenes {
    let lines = group_tokens_into_lines(&page.tokens, options.line_y_precision);
    let headers = detect_headers(&lines);
    debug!(
        page = page_index + 1,
        lines = lines.len(),
        headers = headers.len(),
        "reconstructed page"
    );

    let (records, warnings) =
        parse_header_blocks(page_index, page.width, &lines, &headers, roles, options);

    let diagnostics = PageDiagnostics {
        page: page_index + 1,
        lines: lines
            .iter()
            .take(DIAGNOSTIC_LINES)
            .map(|l| l.text.clone())
            .collect(),
        headers,
    };

    PageScenes {
        records,
        diagnostics,
        warnings,
    }
}

/// One record per header, each block ending at the next header.
///
/// A header whose line no longer reads as `<day> <scene>` still yields a
/// record, with empty day and scene, plus a `MalformedSceneToken` warning.
fn parse_header_blocks<R: RoleResolver + ?Sized>(
    page_index: usize,
    page_width: f64,
    lines: &[Line],
    headers: &[Header],
    roles: &R,
    options: &ParseOptions,
) -> (Vec<SceneRecord>, Vec<ParseWarning>) {
    let mut records = Vec::with_capacity(headers.len());
    let mut warnings = Vec::new();
    for (i, header) in headers.iter().enumerate() {
        let end = headers
            .get(i + 1)
            .map_or(lines.len(), |next| next.line_index);
        let record = parse_scene_block(page_width, lines, header.line_index, end, roles, options);
        if record.day.is_empty() || record.scene.is_empty() {
            warn!(
                page = page_index + 1,
                line = header.line_index,
                "header no longer matches on re-read"
            );
            warnings.push(ParseWarning::on_page(
                WarningCode::MalformedSceneToken,
                format!("header line {} has no day/scene", header.line_index),
                page_index,
            ));
        }
        records.push(record);
    }
    (records, warnings)
}

/// Everything parsed out of a schedule document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScheduleParse {
    /// The role legend of page 1.
    pub roles: RoleMap,
    /// One record per header, in page order then header order.
    pub records: Vec<SceneRecord>,
    /// Per-page diagnostics, in page order.
    pub pages: Vec<PageDiagnostics>,
    pub warnings: Vec<ParseWarning>,
}

/// Build the role legend from page 1 of `source`.
///
/// A missing or unreadable first page, or one without legend lines, yields an
/// empty map and an [`WarningCode::EmptyRoleMap`] warning instead of an error.
pub fn build_role_map<S: TokenSource + ?Sized>(
    source: &S,
    options: &ParseOptions,
) -> (RoleMap, Option<ParseWarning>) {
    let first = if source.page_count() == 0 {
        Err(SourceError::new("document has no pages"))
    } else {
        source.page_tokens(0)
    };
    let roles = match first {
        Ok(page) => RoleMap::from_legend_page(&page, options.legend_y_precision),
        Err(err) => {
            warn!(%err, "could not read the role legend page");
            return (
                RoleMap::new(),
                Some(ParseWarning::on_page(
                    WarningCode::EmptyRoleMap,
                    format!("legend page unreadable: {err}"),
                    0,
                )),
            );
        }
    };
    if roles.is_empty() {
        warn!("no legend entries found on page 1");
        return (
            roles,
            Some(ParseWarning::on_page(
                WarningCode::EmptyRoleMap,
                "no legend entries found",
                0,
            )),
        );
    }
    (roles, None)
}

/// Parse a whole schedule: legend from page 1, then every page in order.
///
/// Failing to read the legend page degrades to an empty role map; failing to
/// read any later page's tokens aborts the parse.
pub fn parse_schedule<S: TokenSource + ?Sized>(
    source: &S,
    options: &ParseOptions,
) -> Result<ScheduleParse, SourceError> {
    let (roles, legend_warning) = build_role_map(source, options);
    let mut parse = ScheduleParse {
        warnings: legend_warning.into_iter().collect(),
        ..ScheduleParse::default()
    };

    for index in 0..source.page_count() {
        let page = match source.page_tokens(index) {
            Ok(page) => page,
            // already reported as an empty legend
            Err(_) if index == 0 => continue,
            Err(err) => return Err(err),
        };
        let scenes = extract_page_scenes(index, &page, &roles, options);
        parse.records.extend(scenes.records);
        parse.pages.push(scenes.diagnostics);
        parse.warnings.extend(scenes.warnings);
    }
    debug!(
        pages = source.page_count(),
        records = parse.records.len(),
        "parsed schedule"
    );
    parse.roles = roles;
    Ok(parse)
}
