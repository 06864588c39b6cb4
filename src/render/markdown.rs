//! Markdown body → HTML and plain-text excerpts.

use crate::utils::slug::slugify;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html::push_html};
use std::collections::HashMap;

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Render a post body to HTML. Headings get `id` anchors.
pub fn to_html(body: &str) -> String {
    let events = with_heading_anchors(Parser::new_ext(body, options()));
    let mut html = String::with_capacity(body.len() * 2);
    push_html(&mut html, events.into_iter());
    html
}

/// Buffer each heading's inner events so the whole heading text is known
/// before its opening tag is written.
fn with_heading_anchors<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut anchors = Anchors::default();
    let mut heading: Option<(HeadingLevel, String, Vec<Event<'a>>)> = None;

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, .. }) if heading.is_none() => {
                heading = Some((level, String::new(), Vec::new()));
            }
            Event::End(TagEnd::Heading(_)) if heading.is_some() => {
                if let Some((level, text, inner)) = heading.take() {
                    let anchor = anchors.claim(&text);
                    push_heading(&mut events, level, &anchor, inner);
                }
            }
            event => match heading.as_mut() {
                Some((_, text, inner)) => {
                    if let Event::Text(t) | Event::Code(t) = &event {
                        text.push_str(t);
                    }
                    inner.push(event);
                }
                None => events.push(event),
            },
        }
    }
    events
}

/// Heading ids handed out within one document.
#[derive(Default)]
struct Anchors {
    seen: HashMap<String, usize>,
}

impl Anchors {
    /// Slug of `text`, suffixed `-1`, `-2`, ... when already taken.
    fn claim(&mut self, text: &str) -> String {
        let base = slugify(text);
        if base.is_empty() {
            return base;
        }

        let mut count = self.seen.get(&base).copied().unwrap_or(0);
        let mut anchor = base.clone();
        while self.seen.contains_key(&anchor) {
            count += 1;
            anchor = format!("{base}-{count}");
        }
        self.seen.insert(base, count);
        self.seen.entry(anchor.clone()).or_insert(0);
        anchor
    }
}

fn push_heading<'a>(events: &mut Vec<Event<'a>>, level: HeadingLevel, anchor: &str, inner: Vec<Event<'a>>) {
    if anchor.is_empty() {
        events.push(Event::Html(format!("<{level}>").into()));
        events.extend(inner);
        events.push(Event::Html(format!("</{level}>\n").into()));
        return;
    }

    events.push(Event::Html(format!("<{level} id=\"{anchor}\">").into()));
    events.extend(inner);
    // h1 is the post title, no self link
    if level != HeadingLevel::H1 {
        events.push(Event::Html(
            format!(" <a class=\"anchor\" href=\"#{anchor}\" aria-hidden=\"true\">#</a>").into(),
        ));
    }
    events.push(Event::Html(format!("</{level}>\n").into()));
}

/// Plain text of a body, cut to at most `max_chars` on a word boundary.
///
/// A cut excerpt ends with `…`.
pub fn excerpt(body: &str, max_chars: usize) -> String {
    let text = plain_text(body);
    if text.chars().count() <= max_chars {
        return text;
    }

    let cut = text
        .char_indices()
        .nth(max_chars)
        .map_or(text.len(), |(i, _)| i);
    let head = &text[..cut];
    // Only back up to a space when the cut landed inside a word.
    let head = if text[cut..].starts_with(char::is_whitespace) {
        head
    } else {
        head.rfind(char::is_whitespace).map_or(head, |i| &head[..i])
    };
    format!("{}…", head.trim_end())
}

fn plain_text(body: &str) -> String {
    let mut text = String::with_capacity(body.len());

    for event in Parser::new_ext(body, options()) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => push_space(&mut text),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock) => {
                push_space(&mut text)
            }
            _ => {}
        }
    }
    text.trim_end().to_owned()
}

fn push_space(text: &mut String) {
    if !text.is_empty() && !text.ends_with(' ') {
        text.push(' ');
    }
}
