//! Cast column resolution.
//!
//! The cast of a scene sits in the right-hand column of the schedule. The
//! column is isolated purely by horizontal position, numeric role ids are
//! pulled out of it and resolved through a [`RoleResolver`], and an inline
//! "<n> Komparsen" extras count is carried on its own line.

use std::collections::BTreeSet;

use crate::cleanup::clean_commas;
use crate::lines::Line;
use crate::patterns::{EXTRAS, SHORT_NUMBER};
use crate::roles::RoleResolver;

/// Text of all tokens in `lines` at or right of `cutoff`, ordered by
/// `(top, x0)` and joined with spaces.
pub fn cast_column_text(lines: &[Line], cutoff: f64) -> String {
    let mut tokens: Vec<_> = lines
        .iter()
        .flat_map(|l| l.tokens.iter())
        .filter(|t| t.x0 >= cutoff)
        .collect();
    tokens.sort_by(|a, b| a.top.total_cmp(&b.top).then(a.x0.total_cmp(&b.x0)));
    tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split an extras count out of the cast text.
///
/// Returns the cast text with every "<n> Komparsen" removed and, if one was
/// present, the first count rendered as "<n> Komparsen".
pub fn split_extras(text: &str) -> (String, Option<String>) {
    match EXTRAS.captures(text) {
        Some(caps) => {
            let extras = format!("{} Komparsen", &caps[1]);
            (EXTRAS.replace_all(text, "").into_owned(), Some(extras))
        }
        None => (text.to_string(), None),
    }
}

/// Resolve the role ids in `text` into a `"<id> <name>, ..."` line.
///
/// Ids are distinct 1-4 digit numbers; unknown ids are dropped and the rest
/// are sorted numerically.
pub fn resolve_cast_names<R: RoleResolver + ?Sized>(text: &str, roles: &R) -> String {
    let ids: BTreeSet<&str> = SHORT_NUMBER.find_iter(text).map(|m| m.as_str()).collect();
    let mut known: Vec<(u32, &str, &str)> = ids
        .into_iter()
        .filter_map(|id| {
            let name = roles.resolve_role(id)?;
            let n = id.parse::<u32>().ok()?;
            Some((n, id, name))
        })
        .collect();
    known.sort();
    let names: Vec<String> = known
        .iter()
        .map(|(_, id, name)| format!("{id} {name}"))
        .collect();
    clean_commas(&names.join(", "))
}

/// Names line, then the extras line if any; empty parts are left out.
pub fn combine_cast(names: &str, extras: Option<&str>) -> String {
    match extras {
        Some(extras) if !names.is_empty() => format!("{names}\n{extras}"),
        Some(extras) => extras.to_string(),
        None => names.to_string(),
    }
}

/// Resolve the cast of a scene block from the tokens right of `cutoff`.
pub fn resolve_cast<R: RoleResolver + ?Sized>(lines: &[Line], cutoff: f64, roles: &R) -> String {
    let column = cast_column_text(lines, cutoff);
    let (remaining, extras) = split_extras(&column);
    let names = resolve_cast_names(&remaining, roles);
    combine_cast(&names, extras.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::group_tokens_into_lines;
    use crate::roles::RoleMap;
    use crate::token::Token;

    fn roles() -> RoleMap {
        [("5", "NURSE"), ("7", "DOCTOR"), ("12", "ANNA")]
            .into_iter()
            .collect()
    }

    #[test]
    fn resolves_known_ids_sorted_numerically() {
        assert_eq!(resolve_cast_names("5 99 7", &roles()), "5 NURSE, 7 DOCTOR");
        assert_eq!(
            resolve_cast_names("12 7 5 7", &roles()),
            "5 NURSE, 7 DOCTOR, 12 ANNA"
        );
    }

    #[test]
    fn no_known_ids_gives_empty_names() {
        assert_eq!(resolve_cast_names("99 100", &roles()), "");
        assert_eq!(resolve_cast_names("5 7", &RoleMap::new()), "");
    }

    #[test]
    fn extras_become_second_line() {
        let (rest, extras) = split_extras("5 NURSE 10 Komparsen");
        assert_eq!(extras.as_deref(), Some("10 Komparsen"));
        let names = resolve_cast_names(&rest, &roles());
        assert_eq!(names, "5 NURSE");
        assert_eq!(
            combine_cast(&names, extras.as_deref()),
            "5 NURSE\n10 Komparsen"
        );
    }

    #[test]
    fn extras_only_and_names_only() {
        assert_eq!(combine_cast("", Some("3 Komparsen")), "3 Komparsen");
        assert_eq!(combine_cast("5 NURSE", None), "5 NURSE");
        assert_eq!(combine_cast("", None), "");
    }

    #[test]
    fn extras_count_is_not_a_role_id() {
        // "7 komparsen" must not resolve role 7
        assert_eq!(resolve_cast(&[], 0.0, &roles()), "");
        let tokens = vec![
            Token::new("5", 400.0, 10.0),
            Token::new("7", 400.0, 20.0),
            Token::new("komparsen", 420.0, 20.0),
        ];
        let lines = group_tokens_into_lines(&tokens, 1);
        assert_eq!(resolve_cast(&lines, 366.0, &roles()), "5 NURSE\n7 Komparsen");
    }

    #[test]
    fn column_cutoff_is_inclusive_and_ordered() {
        let tokens = vec![
            Token::new("12", 380.0, 30.0),
            Token::new("1", 100.0, 10.0),
            Token::new("7", 366.0, 10.0),
            Token::new("5", 420.0, 10.0),
        ];
        let lines = group_tokens_into_lines(&tokens, 1);
        assert_eq!(cast_column_text(&lines, 366.0), "7 5 12");
    }
}
