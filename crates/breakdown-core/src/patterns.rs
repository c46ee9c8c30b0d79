//! Regular expressions shared by the header, scene, and cast stages.

use std::sync::LazyLock;

use regex::Regex;

/// Scene token: digits, optionally followed by uppercase letters and more digits ("12", "12A", "12A3").
const SCENE_TOKEN: &str = r"\d+(?:[A-Z]+(?:\d+)?)?";

/// `<day> / <scene>` at the start of a line.
pub(crate) static HEADER_SLASH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*(\d+)\s*/\s*({SCENE_TOKEN})\b")).expect("valid header regex")
});

/// `<day> <scene>` at the start of a line.
pub(crate) static HEADER_SPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*(\d+)\s+({SCENE_TOKEN})\b")).expect("valid header regex")
});

/// Interior/exterior and time-of-day marker: "I/N", "I+A/EXT", or the compact "AN".
pub(crate) static TIMING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([IA](?:\+[IA])?/[A-ZÄÖÜNTM]+|[IA][NTM])\b").expect("valid timing regex")
});

/// Inline extras count, e.g. "12 Komparsen".
pub(crate) static EXTRAS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*Komparsen").expect("valid extras regex"));

/// Standalone 1-4 digit number (role ids, page and scene numbers in body text).
pub(crate) static SHORT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,4}\b").expect("valid number regex"));

/// A legend entry: leading role id, whitespace, role name.
pub(crate) static LEGEND_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(.+)$").expect("valid legend regex"));

pub(crate) static REPEATED_COMMAS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(,\s*){2,}").expect("valid comma regex"));

pub(crate) static SPACED_SLASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+/\s+").expect("valid slash regex"));

pub(crate) static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
