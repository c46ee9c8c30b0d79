use crate::lines::Line;
use crate::patterns::{HEADER_SLASH, HEADER_SPACE, TIMING};

/// A detected scene header.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    /// Index of the header line within its page.
    pub line_index: usize,
    /// Shooting day (digits).
    pub day: String,
    /// Scene token, e.g. "12", "12A", "12A3".
    pub scene: String,
}

/// Whether `text` contains a timing marker ("I/N", "I+A/EXT", "AN", ...).
pub fn has_timing_marker(text: &str) -> bool {
    TIMING.is_match(text)
}

/// Read `(day, scene)` from the start of a line.
///
/// Accepts `<day> / <scene>` and `<day> <scene>`; the slash form is tried first.
pub fn parse_header_line(text: &str) -> Option<(String, String)> {
    let caps = HEADER_SLASH
        .captures(text)
        .or_else(|| HEADER_SPACE.captures(text))?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// Find scene headers among a page's lines, in line order.
///
/// A line is a header only if it contains a timing marker *and* starts with
/// a day/scene pair. Body lines that merely begin with numbers are skipped.
pub fn detect_headers(lines: &[Line]) -> Vec<Header> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| has_timing_marker(&line.text))
        .filter_map(|(line_index, line)| {
            parse_header_line(&line.text).map(|(day, scene)| Header {
                line_index,
                day,
                scene,
            })
        })
        .collect()
}
