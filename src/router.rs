//! URL routing.
//!
//! [`route`] decides what a request is, without doing any I/O. Rules are
//! checked in a fixed order and the first match wins:
//!
//! | Rule | Match                          | Outcome                         |
//! |------|--------------------------------|---------------------------------|
//! | 1    | host is the legacy host        | 308 to the canonical origin     |
//! | 2    | `/`                            | 307 to `/daily`                 |
//! | 3    | `/daily/`                      | 307 to `/daily`                 |
//! | 4    | `/daily`                       | listing page                    |
//! | 5    | `/daily/YYYY-MM-DD/`           | 307 to `/daily/YYYY-MM-DD`      |
//! | 6    | `/daily/YYYY-MM-DD`            | entry page                      |
//! | 7    | anything else                  | static file server              |
//!
//! A malformed date under `/daily/` is not an error; it simply matches
//! nothing and falls through to rule 7.

use crate::config::SiteInfo;
use crate::entry::EntryId;
use regex::Regex;
use std::sync::LazyLock;

static ENTRY_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/daily/([0-9]{4}-[0-9]{2}-[0-9]{2})(/?)$").expect("entry path regex is valid")
});

/// What to do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Permanent redirect (308) to an absolute URL.
    PermanentRedirect(String),
    /// Temporary redirect (307) to an origin-relative path.
    TemporaryRedirect(String),
    Listing,
    Entry(EntryId),
    Static,
}

/// Match a request's host and path against the routing rules.
///
/// `host` is the `Host` header value, if any; a port suffix and a trailing
/// root-label dot are ignored, and the comparison is case-insensitive.
pub fn route(site: &SiteInfo, host: Option<&str>, path: &str) -> Route {
    if host.is_some_and(|h| hostname(h).eq_ignore_ascii_case(&site.legacy_host)) {
        return Route::PermanentRedirect(site.canonical_origin.clone());
    }

    match path {
        "/" | "/daily/" => return Route::TemporaryRedirect("/daily".to_string()),
        "/daily" => return Route::Listing,
        _ => {}
    }

    if let Some(caps) = ENTRY_PATH.captures(path) {
        let date = &caps[1];
        if !caps[2].is_empty() {
            return Route::TemporaryRedirect(format!("/daily/{date}"));
        }
        if let Some(id) = EntryId::parse(date) {
            return Route::Entry(id);
        }
    }

    Route::Static
}

/// Strip a `:port` suffix and the trailing dot of a fully qualified name,
/// leaving bracketed IPv6 literals intact.
fn hostname(host: &str) -> &str {
    let name = match host.rfind(':') {
        Some(i) if !host[i..].contains(']') => &host[..i],
        _ => host,
    };
    name.trim_end_matches('.')
}
