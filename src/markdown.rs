//! Markdown to sanitized HTML.
//!
//! Entries are written in GitHub-flavored markdown and may embed media with
//! raw `<video>`/`<source>` markup. Conversion is pulldown-cmark; the result
//! then goes through ammonia's default policy, widened to let `source` and its
//! `src` attribute through. Everything else outside the default allow-list,
//! `script` and `style` content included, is removed.

use ammonia::Builder;
use pulldown_cmark::{Options, Parser, html};

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Render `source` to an HTML fragment that is safe to embed unescaped.
pub fn render(source: &str) -> String {
    let mut unsafe_html = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut unsafe_html, Parser::new_ext(source, options()));

    Builder::default()
        .add_tags(["source"])
        .add_tag_attributes("source", ["src"])
        .clean(&unsafe_html)
        .to_string()
}
