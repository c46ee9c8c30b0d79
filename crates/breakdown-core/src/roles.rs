//! Role legend parsing.
//!
//! Page 1 of a shooting schedule carries a two-column legend of
//! `<id> <role name>` entries. [`RoleMap::from_legend_page`] reads it; the
//! scene stages only see the [`RoleResolver`] capability so other legend
//! layouts can be plugged in.

use std::collections::BTreeMap;

use tracing::debug;

use crate::lines::group_tokens_into_lines;
use crate::patterns::LEGEND_ENTRY;
use crate::token::{PageTokens, Token};

/// Resolves a numeric role id to a role name.
pub trait RoleResolver {
    /// The name for `id`, or `None` if the id is unknown.
    fn resolve_role(&self, id: &str) -> Option<&str>;
}

/// Mapping from role id (digits) to role name.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoleMap {
    roles: BTreeMap<String, String>,
}

impl RoleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the two-column legend of the first schedule page.
    ///
    /// Tokens left of the page midpoint form the left column, all others the
    /// right column. Each column is grouped into lines on its own; lines that
    /// read `<digits> <name>` become entries. The right column is applied last
    /// and wins on duplicate ids.
    pub fn from_legend_page(page: &PageTokens, y_precision: u32) -> Self {
        let midpoint = page.midpoint();
        let (left, right): (Vec<Token>, Vec<Token>) = page
            .tokens
            .iter()
            .cloned()
            .partition(|t| t.x0 < midpoint);

        let mut map = Self::new();
        for column in [left, right] {
            for line in group_tokens_into_lines(&column, y_precision) {
                if let Some(caps) = LEGEND_ENTRY.captures(&line.text) {
                    map.insert(&caps[1], caps[2].trim());
                }
            }
        }
        debug!(roles = map.len(), "parsed role legend");
        map
    }

    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.roles.insert(id.into(), name.into());
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Entries sorted by numeric id.
    pub fn sorted_entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .roles
            .iter()
            .map(|(id, name)| (id.as_str(), name.as_str()))
            .collect();
        entries.sort_by_key(|(id, _)| (id.parse::<u64>().unwrap_or(u64::MAX), *id));
        entries
    }
}

impl RoleResolver for RoleMap {
    fn resolve_role(&self, id: &str) -> Option<&str> {
        self.roles.get(id).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RoleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (id, name) in iter {
            map.insert(id, name);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legend_page(tokens: Vec<Token>) -> PageTokens {
        PageTokens::new(600.0, tokens)
    }

    #[test]
    fn parses_both_columns() {
        let page = legend_page(vec![
            Token::new("1", 40.0, 100.2),
            Token::new("ANNA", 60.0, 100.4),
            Token::new("2", 40.0, 115.0),
            Token::new("DR.", 60.0, 115.0),
            Token::new("BERG", 90.0, 115.0),
            Token::new("10", 320.0, 100.0),
            Token::new("NURSE", 345.0, 100.0),
        ]);
        let map = RoleMap::from_legend_page(&page, 0);
        assert_eq!(map.len(), 3);
        assert_eq!(map.resolve_role("1"), Some("ANNA"));
        assert_eq!(map.resolve_role("2"), Some("DR. BERG"));
        assert_eq!(map.resolve_role("10"), Some("NURSE"));
        assert_eq!(map.resolve_role("3"), None);
    }

    #[test]
    fn columns_do_not_mix_on_the_same_row() {
        // Without the column split this row would read "1 ANNA 10 NURSE".
        let page = legend_page(vec![
            Token::new("1", 40.0, 100.0),
            Token::new("ANNA", 60.0, 100.0),
            Token::new("10", 320.0, 100.0),
            Token::new("NURSE", 345.0, 100.0),
        ]);
        let map = RoleMap::from_legend_page(&page, 0);
        assert_eq!(map.resolve_role("1"), Some("ANNA"));
        assert_eq!(map.resolve_role("10"), Some("NURSE"));
    }

    #[test]
    fn right_column_wins_on_duplicate_id() {
        let page = legend_page(vec![
            Token::new("5", 40.0, 100.0),
            Token::new("LEFT", 60.0, 100.0),
            Token::new("5", 320.0, 140.0),
            Token::new("RIGHT", 345.0, 140.0),
        ]);
        let map = RoleMap::from_legend_page(&page, 0);
        assert_eq!(map.resolve_role("5"), Some("RIGHT"));
    }

    #[test]
    fn token_at_midpoint_belongs_to_right_column() {
        let page = legend_page(vec![
            Token::new("7", 300.0, 100.0),
            Token::new("MAX", 320.0, 100.0),
            Token::new("TITLE", 40.0, 100.0),
        ]);
        let map = RoleMap::from_legend_page(&page, 0);
        assert_eq!(map.resolve_role("7"), Some("MAX"));
    }

    #[test]
    fn ignores_non_legend_lines() {
        let page = legend_page(vec![
            Token::new("Rollen", 40.0, 50.0),
            Token::new("12", 40.0, 70.0),
        ]);
        assert!(RoleMap::from_legend_page(&page, 0).is_empty());
        assert!(RoleMap::from_legend_page(&PageTokens::default(), 0).is_empty());
    }

    #[test]
    fn sorted_entries_are_numeric() {
        let map: RoleMap = [("10", "J"), ("2", "B"), ("1", "A")].into_iter().collect();
        let ids: Vec<&str> = map.sorted_entries().iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec!["1", "2", "10"]);
    }
}
