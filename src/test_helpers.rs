//! Shared test utilities: temporary entry directories and id helpers.

use crate::entry::EntryId;
use tempfile::TempDir;

/// Markdown written for `date` by [`setup_entries`].
pub fn entry_source(date: &str) -> String {
    format!("# Thought of {date}\n\nSomething **worth** writing down.\n")
}

/// Create a temp directory holding one `<date>.md` file per date.
pub fn setup_entries(dates: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for date in dates {
        std::fs::write(tmp.path().join(format!("{date}.md")), entry_source(date)).unwrap();
    }
    tmp
}

/// Parse a list of dates, panicking on a malformed one.
pub fn ids(dates: &[&str]) -> Vec<EntryId> {
    dates
        .iter()
        .map(|d| EntryId::parse(d).unwrap_or_else(|| panic!("bad test date {d:?}")))
        .collect()
}

pub fn as_strs(ids: &[EntryId]) -> Vec<&str> {
    ids.iter().map(EntryId::as_str).collect()
}
