//! HTML front end: askama templates, HTMX fragments

pub mod handlers;

use pulldown_cmark::{html, Event, Options, Parser};

/// Render report markdown (tables enabled) to an HTML fragment.
///
/// Raw HTML in the source is emitted as escaped text. Location names come
/// from query strings and the geocoder.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, parser);
    out
}
