use crate::cast::resolve_cast;
use crate::cleanup::clean_summary;
use crate::headers::parse_header_line;
use crate::lines::{Line, join_line_texts};
use crate::options::ParseOptions;
use crate::patterns::TIMING;
use crate::roles::RoleResolver;

/// One parsed scene of the shooting schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneRecord {
    pub day: String,
    pub scene: String,
    /// Timing marker in slash form, e.g. "I/N" or "I+A/EXT".
    pub timing: String,
    /// Free-text scene description.
    pub summary: String,
    /// Resolved names line, then an optional extras line.
    pub cast: String,
}

/// Canonical slash form of a timing marker: "AN" becomes "A/N".
pub fn canonical_timing(marker: &str) -> String {
    let mut chars = marker.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a @ ('I' | 'A')), Some(b @ ('N' | 'T' | 'M')), None) => format!("{a}/{b}"),
        _ => marker.to_string(),
    }
}

/// Parse the scene block `lines[start..end]` of a page.
///
/// `start` is the header line; `end` is the next header's line index or the
/// number of lines on the page. Day and scene are re-read from the header
/// line text and are empty if it no longer matches.
pub fn parse_scene_block<R: RoleResolver + ?Sized>(
    page_width: f64,
    lines: &[Line],
    start: usize,
    end: usize,
    roles: &R,
    options: &ParseOptions,
) -> SceneRecord {
    let end = end.min(lines.len());
    let block = lines.get(start..end).unwrap_or(&[]);

    let (day, scene) = block
        .first()
        .and_then(|header| parse_header_line(&header.text))
        .unwrap_or_default();

    let block_text = join_line_texts(block);

    let (timing, after_timing) = match TIMING.captures(&block_text) {
        Some(caps) => {
            let whole = caps.get(0).map_or(block_text.len(), |m| m.end());
            (canonical_timing(&caps[1]), block_text[whole..].trim())
        }
        None => (String::new(), block_text.as_str()),
    };
    let summary = clean_summary(after_timing);

    let cutoff = page_width * options.cast_split_ratio;
    let cast = resolve_cast(block, cutoff, roles);

    SceneRecord {
        day,
        scene,
        timing,
        summary,
        cast,
    }
}
