use std::collections::HashMap;

use pulldown_cmark::{html, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd};

/// Converts page source to HTML ready to embed in a page.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, source: &str) -> String;
}

/// Service for handling markdown rendering
///
/// Tables, footnotes, strikethrough, task lists and `[[wiki links]]` are
/// enabled. Raw HTML in the source is passed through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownService;

impl MarkdownService {
    /// Create a new markdown service
    pub fn new() -> Self {
        Self
    }

    fn options() -> Options {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_WIKILINKS);
        options
    }
}

impl MarkdownRenderer for MarkdownService {
    fn render(&self, source: &str) -> String {
        let mut events: Vec<Event> = Parser::new_ext(source, Self::options()).collect();
        assign_heading_ids(&mut events);

        let events = events.into_iter().map(|ev| match ev {
            Event::Start(Tag::Link { link_type: link_type @ LinkType::WikiLink { .. }, dest_url, title, id }) => {
                Event::Start(Tag::Link {
                    link_type,
                    dest_url: CowStr::from(wiki_href(&dest_url)),
                    title,
                    id,
                })
            }
            other => other,
        });

        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, events);
        out
    }
}

/// Give every heading without an explicit id a slug of its text.
fn assign_heading_ids(events: &mut [Event]) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut i = 0;
    while i < events.len() {
        let Event::Start(Tag::Heading { id: None, .. }) = &events[i] else {
            i += 1;
            continue;
        };

        let mut text = String::new();
        let mut j = i + 1;
        while j < events.len() {
            match &events[j] {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                Event::SoftBreak | Event::HardBreak => text.push(' '),
                _ => {}
            }
            j += 1;
        }

        let mut slug = slugify(&text);
        if slug.is_empty() {
            slug = "heading".to_string();
        }
        let count = seen.entry(slug.clone()).or_insert(0);
        if *count > 0 {
            slug = format!("{}-{}", slug, *count);
        }
        *count += 1;

        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(CowStr::from(slug));
        }
        i = j;
    }
}

/// Create URL-friendly slug from text
fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_dash = false;
    for ch in text.chars() {
        let c = ch.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_dash = false;
        } else if (c.is_ascii_whitespace() || c == '-' || c == '_') && !last_dash && !out.is_empty() {
            out.push('-');
            last_dash = true;
        }
    }
    if out.ends_with('-') {
        out.pop();
    }
    out
}

/// Map a wiki link target to a site path: `Page` becomes `/Page`.
fn wiki_href(target: &str) -> String {
    let (page, fragment) = match target.split_once('#') {
        Some((page, fragment)) => (page, Some(fragment)),
        None => (target, None),
    };
    let page = page.trim().trim_end_matches(".html");

    let mut href = String::new();
    if !page.is_empty() {
        if !page.starts_with('/') {
            href.push('/');
        }
        href.push_str(page);
    }
    if let Some(fragment) = fragment {
        href.push('#');
        href.push_str(fragment);
    }
    href
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(source: &str) -> String {
        MarkdownService::new().render(source)
    }

    #[test]
    fn wiki_links_resolve_to_page_paths() {
        let html = render("See [[About]] and [[Contact|write us]].");
        assert!(html.contains(r#"<a href="/About">About</a>"#), "{html}");
        assert!(html.contains(r#"<a href="/Contact">write us</a>"#), "{html}");
    }

    #[test]
    fn wiki_href_variants() {
        assert_eq!(wiki_href("Page"), "/Page");
        assert_eq!(wiki_href("Page.html"), "/Page");
        assert_eq!(wiki_href("Page#intro"), "/Page#intro");
        assert_eq!(wiki_href("#intro"), "#intro");
        assert_eq!(wiki_href("/Page"), "/Page");
    }

    #[test]
    fn headings_get_ids() {
        let html = render("# Hello World\n\n## Hello World\n\n## `code` & more\n");
        assert!(html.contains(r#"<h1 id="hello-world">Hello World</h1>"#), "{html}");
        assert!(html.contains(r#"<h2 id="hello-world-1">Hello World</h2>"#), "{html}");
        assert!(html.contains(r#"id="code-more""#), "{html}");
    }

    #[test]
    fn tables_and_footnotes() {
        let html = render("| a | b |\n|---|---|\n| 1 | 2 |\n\nText[^1].\n\n[^1]: Note.\n");
        assert!(html.contains("<table>"), "{html}");
        assert!(html.contains("<td>1</td>"), "{html}");
        assert!(html.contains("footnote"), "{html}");
    }

    #[test]
    fn raw_html_passes_through() {
        let html = render("Hello <script>alert(1)</script>");
        assert!(html.contains("<script>alert(1)</script>"), "{html}");
    }

    #[test]
    fn slugify_drops_punctuation() {
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("  a  b  "), "a-b");
        assert_eq!(slugify("!!!"), "");
    }
}
