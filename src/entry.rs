//! Entry identifiers and the date-format predicate.
//!
//! Every entry is named after the day it was written: `2024-03-01.md` on disk,
//! `/daily/2024-03-01` in URLs. The [`EntryId`] newtype guarantees the string
//! has the `YYYY-MM-DD` shape, so it is safe to splice into file paths and
//! hrefs without further checks.
//!
//! The predicate is purely syntactic. `2024-13-45` is a well-formed id; it just
//! won't have a file behind it, and the repository reports it as not found.
//! Because the shape is fixed-width, lexicographic order is chronological
//! order, which is what the derived [`Ord`] relies on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `YYYY-MM-DD` date naming one entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(String);

impl EntryId {
    /// Returns `Some` if `s` is exactly 4 digits, `-`, 2 digits, `-`, 2 digits.
    pub fn parse(s: &str) -> Option<Self> {
        is_entry_date(s).then(|| EntryId(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Origin-relative URL of the entry's page.
    pub fn path(&self) -> String {
        format!("/daily/{}", self.0)
    }

    /// Name of the markdown file holding the entry's source.
    pub fn file_name(&self) -> String {
        format!("{}.md", self.0)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The date-format predicate. ASCII digits only; Unicode digits are rejected.
pub fn is_entry_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// One entry: its id plus the raw markdown source.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: EntryId,
    pub source: String,
}

/// How the repository orders the entry list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryOrder {
    /// Descending by date. Navigation assumes this order.
    #[default]
    NewestFirst,
    /// Whatever the directory enumeration yields, untouched.
    Filesystem,
}

/// The adjacent entries of one entry within an entry list.
///
/// The list is read newest-first: the element after the entry is the
/// *previous* (older) thought, the element before it is the *next* (newer)
/// one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationContext {
    /// Position of the entry in the list, `None` if it isn't listed.
    pub index: Option<usize>,
    pub previous: Option<EntryId>,
    pub next: Option<EntryId>,
}

impl NavigationContext {
    pub fn new(id: &EntryId, entries: &[EntryId]) -> Self {
        let index = entries.iter().position(|e| e == id);
        let previous = index.and_then(|i| entries.get(i + 1)).cloned();
        let next = index
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| entries.get(i))
            .cloned();
        NavigationContext {
            index,
            previous,
            next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::ids;

    #[test]
    fn accepts_well_formed_dates() {
        assert!(is_entry_date("2024-03-01"));
        assert!(is_entry_date("0000-00-00"));
        assert!(is_entry_date("2024-13-45"));
    }

    #[test]
    fn rejects_malformed_dates() {
        for s in [
            "",
            "2024-3-01",
            "2024-03-1",
            "24-03-01",
            "2024-03-011",
            "2024_03_01",
            "2024-03-0a",
            "abcd-ef-gh",
            "2024-03-01/",
            "２０２４-03-01",
        ] {
            assert!(!is_entry_date(s), "{s:?} should be rejected");
        }
    }

    #[test]
    fn entry_id_paths() {
        let id = EntryId::parse("2024-02-15").unwrap();
        assert_eq!(id.path(), "/daily/2024-02-15");
        assert_eq!(id.file_name(), "2024-02-15.md");
        assert_eq!(id.to_string(), "2024-02-15");
    }

    #[test]
    fn ids_order_chronologically() {
        let mut list = ids(&["2024-02-15", "2023-12-31", "2024-03-01"]);
        list.sort();
        assert_eq!(list, ids(&["2023-12-31", "2024-02-15", "2024-03-01"]));
    }

    #[test]
    fn interior_entry_has_both_neighbours() {
        let list = ids(&["2024-03-01", "2024-02-15", "2024-01-10"]);
        let nav = NavigationContext::new(&list[1], &list);
        assert_eq!(nav.index, Some(1));
        assert_eq!(nav.previous.unwrap().as_str(), "2024-01-10");
        assert_eq!(nav.next.unwrap().as_str(), "2024-03-01");
    }

    #[test]
    fn first_entry_has_no_next() {
        let list = ids(&["2024-03-01", "2024-02-15", "2024-01-10"]);
        let nav = NavigationContext::new(&list[0], &list);
        assert_eq!(nav.next, None);
        assert_eq!(nav.previous.unwrap().as_str(), "2024-02-15");
    }

    #[test]
    fn last_entry_has_no_previous() {
        let list = ids(&["2024-03-01", "2024-02-15", "2024-01-10"]);
        let nav = NavigationContext::new(&list[2], &list);
        assert_eq!(nav.previous, None);
        assert_eq!(nav.next.unwrap().as_str(), "2024-02-15");
    }

    #[test]
    fn single_entry_has_no_neighbours() {
        let list = ids(&["2024-03-01"]);
        let nav = NavigationContext::new(&list[0], &list);
        assert_eq!(nav.previous, None);
        assert_eq!(nav.next, None);
    }

    #[test]
    fn unlisted_entry_has_no_neighbours() {
        let list = ids(&["2024-03-01", "2024-02-15"]);
        let missing = EntryId::parse("2020-01-01").unwrap();
        let nav = NavigationContext::new(&missing, &list);
        assert_eq!(nav.index, None);
        assert_eq!(nav.previous, None);
        assert_eq!(nav.next, None);
    }

    #[test]
    fn order_parses_from_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            order: EntryOrder,
        }
        let w: Wrapper = toml::from_str(r#"order = "filesystem""#).unwrap();
        assert_eq!(w.order, EntryOrder::Filesystem);
        let w: Wrapper = toml::from_str(r#"order = "newest-first""#).unwrap();
        assert_eq!(w.order, EntryOrder::NewestFirst);
    }
}
