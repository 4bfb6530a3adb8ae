//! Page composition.
//!
//! Two pages exist: the listing at `/daily` and one page per entry at
//! `/daily/<date>`. Both are wrapped in the same shell (head, site header,
//! `main` region). Composition is pure: it takes already-loaded data and
//! returns a [`Document`], leaving I/O to the caller.

use crate::config::SiteInfo;
use crate::document::{Document, Node, el, fragment, raw, text};
use crate::entry::{Entry, EntryId, NavigationContext};
use crate::markdown;

pub const LISTING_TITLE: &str = "Daily Thoughts";

/// The listing page: every entry as a link, in the order given.
pub fn listing_page(site: &SiteInfo, entries: &[EntryId]) -> Document {
    let items = entries.iter().map(|id| {
        el("li")
            .class("my-4 font-bold text-lg")
            .child(entry_link(id, id.as_str()))
    });

    let intro = el("p").children([
        text("Hey, I'm Hanno! These are my daily thoughts on "),
        el("a")
            .attr("href", &site.repository_url)
            .child(text(&site.name)),
        text(
            ", the programming language I'm creating. If you have any questions, \
             comments, or feedback, please ",
        ),
        el("a")
            .attr("href", format!("mailto:{}", site.contact_email))
            .child(text("get in touch")),
        text("!"),
    ]);

    let content = fragment([
        el("h2").child(text(LISTING_TITLE)),
        intro,
        el("ol").class("m-8").children(items),
    ]);

    page(site, LISTING_TITLE, content)
}

/// A single entry with its rendered body and prev/next links.
pub fn entry_page(site: &SiteInfo, entry: &Entry, entries: &[EntryId]) -> Document {
    let nav = NavigationContext::new(&entry.id, entries);
    let body = markdown::render(&entry.source);
    let title = format!("Daily Thought - {}", entry.id);

    let previous = nav.previous.map(|id| {
        el("span")
            .class("col-1 justify-self-start")
            .child(entry_link(&id, "<< previous thought"))
    });
    let next = nav.next.map(|id| {
        el("span")
            .class("col-2 justify-self-end")
            .child(entry_link(&id, "next thought >>"))
    });

    let content = fragment([
        el("h2").child(text(&title)),
        el("a").attr("href", "/daily").child(text("< back to list")),
        el("main").class("prose").child(raw(body)),
        el("div")
            .class("grid grid-cols-2")
            .children(previous)
            .children(next),
    ]);

    page(site, &title, content)
}

fn entry_link(id: &EntryId, label: &str) -> Node {
    el("a").attr("href", id.path()).child(text(label))
}

/// The shell shared by every page.
fn page(site: &SiteInfo, title: &str, content: Node) -> Document {
    let head = el("head").children([
        el("title").child(text(format!("{title} - {}", site.name))),
        el("meta").attr("charset", "UTF-8"),
        el("meta")
            .attr("name", "viewport")
            .attr("content", "width=device-width, initial-scale=1"),
        el("link").attr("href", "/style.css").attr("rel", "stylesheet"),
    ]);

    let body = el("body").class("max-w-xl mx-auto p-2").children([
        el("header").child(el("h1").child(text(&site.name))),
        el("main").child(content),
    ]);

    Document {
        title: title.to_string(),
        root: el("html").attr("lang", "en").children([head, body]),
    }
}
