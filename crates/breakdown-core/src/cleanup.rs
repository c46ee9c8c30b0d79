//! Text normalizations applied to scene summaries, cast lines, and the
//! finished table.

use crate::patterns::{EXTRAS, REPEATED_COMMAS, SHORT_NUMBER, SPACED_SLASH, WHITESPACE_RUN};

/// Legacy phrases that older templates carry in stray cells and paragraphs.
pub const ARTIFACT_PHRASES: [&str; 2] = ["Krankenpfeger*in", "Krankenpfleger*in"];

const EDGE_SEPARATORS: &[char] = &[' ', ',', ';', '/'];

/// Collapse runs of two or more commas (with any whitespace between them)
/// into a single `", "`.
pub fn collapse_commas(text: &str) -> String {
    REPEATED_COMMAS.replace_all(text, ", ").into_owned()
}

/// [`collapse_commas`], then trim spaces, commas, semicolons, and slashes
/// from both ends.
///
/// Idempotent: `clean_commas(&clean_commas(s)) == clean_commas(s)`.
pub fn clean_commas(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    collapse_commas(text)
        .trim_matches(EDGE_SEPARATORS)
        .to_string()
}

/// Turn slashes produced by adjacent columns into comma separators and
/// normalize whitespace.
pub fn fix_fake_slashes(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = SPACED_SLASH.replace_all(text, ", ");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    text.trim_matches(EDGE_SEPARATORS).to_string()
}

/// Remove every "<digits> Komparsen" occurrence.
pub fn strip_extras(text: &str) -> String {
    EXTRAS.replace_all(text, "").into_owned()
}

/// Remove every standalone 1-4 digit number.
pub fn strip_short_numbers(text: &str) -> String {
    SHORT_NUMBER.replace_all(text, "").into_owned()
}

/// The full summary cleanup chain: extras, numbers, slashes, commas.
pub fn clean_summary(text: &str) -> String {
    let text = strip_extras(text);
    let text = strip_short_numbers(&text);
    let text = fix_fake_slashes(&text);
    clean_commas(&text)
}

/// Remove the [`ARTIFACT_PHRASES`]. Returns `None` when none were present.
pub fn remove_artifacts(text: &str) -> Option<String> {
    if !ARTIFACT_PHRASES.iter().any(|p| text.contains(p)) {
        return None;
    }
    let mut out = text.to_string();
    for phrase in ARTIFACT_PHRASES {
        out = out.replace(phrase, "");
    }
    Some(out)
}

/// Scrub one paragraph or cell text: artifacts first, then repeated commas
/// when a `", ,"` sequence is visible. Returns `None` if nothing changed.
pub fn scrub_text(text: &str) -> Option<String> {
    let mut changed = false;
    let mut out = match remove_artifacts(text) {
        Some(t) => {
            changed = true;
            t
        }
        None => text.to_string(),
    };
    if out.contains(", ,") {
        out = collapse_commas(&out);
        changed = true;
    }
    changed.then_some(out)
}
