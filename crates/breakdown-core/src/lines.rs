use std::collections::BTreeMap;

use crate::token::Token;

/// A text line: tokens sharing a rounded vertical position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// The rounded vertical position shared by all tokens.
    pub y: f64,
    /// Tokens in this line, sorted left-to-right.
    pub tokens: Vec<Token>,
    /// Token texts joined by single spaces, trimmed.
    pub text: String,
}

/// Integer bucket for `top` rounded to `precision` decimal places.
pub(crate) fn round_key(top: f64, precision: u32) -> i64 {
    let scale = 10f64.powi(precision as i32);
    (top * scale).round() as i64
}

/// Group tokens into lines by rounded vertical position.
///
/// Tokens whose `top` rounds to the same value at `precision` decimal places
/// form one line. Tokens within a line are sorted by `x0`; lines are sorted by
/// `y` ascending. Lines whose joined text is blank are dropped. The grouping is
/// deterministic: ties keep the input order.
pub fn group_tokens_into_lines(tokens: &[Token], precision: u32) -> Vec<Line> {
    let mut by_y: BTreeMap<i64, Vec<&Token>> = BTreeMap::new();
    for token in tokens {
        by_y.entry(round_key(token.top, precision)).or_default().push(token);
    }

    let scale = 10f64.powi(precision as i32);
    let mut lines = Vec::with_capacity(by_y.len());
    for (key, mut row) in by_y {
        row.sort_by(|a, b| a.x0.total_cmp(&b.x0));
        let text = row
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        lines.push(Line {
            y: key as f64 / scale,
            text: text.to_string(),
            tokens: row.into_iter().cloned().collect(),
        });
    }
    lines
}

/// Join the texts of `lines` with single spaces.
pub fn join_line_texts(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
