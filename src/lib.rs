//! # Daily Thoughts
//!
//! A small web server for a blog of dated entries. Entries are markdown files
//! named after the day they were written; each one is rendered to HTML when
//! requested, with links to the entries before and after it.
//!
//! # Request Pipeline
//!
//! ```text
//! 1. Route     host + path     →  Route            (pure, no I/O)
//! 2. Load      entries dir     →  ids + source     (fresh on every request)
//! 3. Compose   ids + source    →  Document         (pure)
//! 4. Respond   Document        →  HTTP response    (doctype + text/html)
//! ```
//!
//! Redirects skip steps 2 to 4. Paths the router doesn't own go to a static
//! file server rooted at the configured static directory.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`router`] | Maps host and path to a [`router::Route`] |
//! | [`repository`] | Lists and loads entries from the entries directory |
//! | [`entry`] | `YYYY-MM-DD` ids, the date predicate, prev/next navigation |
//! | [`compose`] | Builds the listing and entry pages inside the shared shell |
//! | [`markdown`] | Markdown to sanitized HTML |
//! | [`document`] | Immutable markup tree and its HTML writer |
//! | [`server`] | axum handler, response building, listener startup |
//! | [`config`] | `config.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## No Caching
//!
//! The entry list is rebuilt from the directory on every request. A new file
//! is live as soon as it is written, and nothing has to be invalidated. For a
//! personal site the directory read is cheap.
//!
//! ## Entry Order
//!
//! Navigation treats the entry list as newest-first: the element after an
//! entry is the previous thought, the one before it the next. By default the
//! list is sorted descending by date so that this holds. Setting
//! `content.order = "filesystem"` uses raw directory order instead.
//!
//! ## Explicit Document Tree
//!
//! Pages are built as [`document::Node`] values rather than with a template
//! macro. The tree can be inspected in tests and serialized in one place, and
//! the only unescaped content is the sanitized markdown body.

pub mod compose;
pub mod config;
pub mod document;
pub mod entry;
pub mod markdown;
pub mod output;
pub mod repository;
pub mod router;
pub mod server;

#[cfg(test)]
pub(crate) mod test_helpers;
