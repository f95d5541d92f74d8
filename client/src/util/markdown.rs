//! Markdown rendering for assistant replies.

#[cfg(test)]
#[path = "markdown_test.rs"]
mod markdown_test;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};
use url::Url;

/// Link schemes that may reach the DOM as a live `href`/`src`.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Render assistant Markdown to HTML with raw HTML stripped.
///
/// Link and image targets with any other scheme (`javascript:`, `data:`)
/// are blanked; relative targets are kept.
pub fn render_reply_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    // Model output is untrusted: never pass raw HTML through to `inner_html`.
    let parser = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(_) | Event::InlineHtml(_) => None,
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
            Some(Event::Start(Tag::Link { link_type, dest_url: sanitize_target(dest_url), title, id }))
        }
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => {
            Some(Event::Start(Tag::Image { link_type, dest_url: sanitize_target(dest_url), title, id }))
        }
        other => Some(other),
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

fn sanitize_target(dest: CowStr<'_>) -> CowStr<'_> {
    if is_safe_target(&dest) { dest } else { CowStr::Borrowed("") }
}

fn is_safe_target(dest: &str) -> bool {
    match Url::parse(dest.trim()) {
        Ok(url) => ALLOWED_SCHEMES.contains(&url.scheme()),
        Err(url::ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}
