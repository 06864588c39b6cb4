//! Output minification for rendered pages and the feed.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// What kind of document is being written.
pub enum MinifyType<'a> {
    Html(&'a [u8]),
    Xml(&'a [u8]),
}

/// Minify `content` when `[build].minify` is on, otherwise borrow it back.
pub fn minify<'a>(content: MinifyType<'a>, config: &SiteConfig) -> Cow<'a, [u8]> {
    match (config.build.minify, content) {
        (false, MinifyType::Html(bytes) | MinifyType::Xml(bytes)) => Cow::Borrowed(bytes),
        (true, MinifyType::Html(html)) => Cow::Owned(minify_html(html)),
        (true, MinifyType::Xml(xml)) => Cow::Owned(minify_xml(xml)),
    }
}

fn minify_html(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.minify_css = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;
    minify_html::minify(html, &cfg)
}

/// Strip indentation and blank lines.
///
/// Lines are glued only between a closing `>` and an opening `<`; a line break
/// inside text content is kept.
fn minify_xml(xml: &[u8]) -> Vec<u8> {
    let xml = String::from_utf8_lossy(xml);
    let mut out = String::with_capacity(xml.len());

    for line in xml.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if !out.is_empty() && !(out.ends_with('>') && line.starts_with('<')) {
            out.push('\n');
        }
        out.push_str(line);
    }
    out.into_bytes()
}
