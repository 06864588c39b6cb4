//! YAML frontmatter of Markdown documents.
//!
//! ```text
//! ---
//! title: Hello
//! date: 2021-06-15
//! tags: [rust, blog]
//! ---
//! body...
//! ```

use serde::{Deserialize, Deserializer};

/// Metadata block at the top of a Markdown document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Frontmatter {
    pub title: String,
    /// `YYYY-MM-DD` or RFC 3339. Parsed lazily by the query engine.
    pub date: Option<String>,
    /// `tags: [a, b]` or a single `tags: a`.
    #[serde(deserialize_with = "one_or_many")]
    pub tags: Vec<String>,
    pub description: Option<String>,
    /// Hero image, relative to the post or absolute.
    pub image: Option<String>,
    /// Link to the image source.
    pub image_credit: Option<String>,
    pub image_author: Option<String>,
    pub draft: bool,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(tag)) => vec![tag],
        Some(OneOrMany::Many(tags)) => tags,
        None => Vec::new(),
    })
}

#[cfg(test)]
impl Frontmatter {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Split a document into its raw frontmatter block and body.
///
/// Returns an empty block when the document does not open with a `---` fence
/// or the fence is never closed.
pub fn split(content: &str) -> (&str, &str) {
    let trimmed = content.trim_start_matches('\u{feff}');
    let Some(rest) = trimmed
        .strip_prefix("---\n")
        .or_else(|| trimmed.strip_prefix("---\r\n"))
    else {
        return ("", content);
    };

    // closing fence is either at the very start (empty block) or after a newline
    if let Some(body) = rest.strip_prefix("---") {
        return ("", strip_line_end(body));
    }
    match rest.find("\n---") {
        Some(end) => (&rest[..end], strip_line_end(&rest[end + 4..])),
        None => ("", content),
    }
}

fn strip_line_end(s: &str) -> &str {
    s.strip_prefix("\r\n")
        .or_else(|| s.strip_prefix('\n'))
        .unwrap_or(s)
}

/// Parse a document into frontmatter and body.
pub fn parse(content: &str) -> Result<(Frontmatter, &str), serde_yaml::Error> {
    let (block, body) = split(content);
    if block.trim().is_empty() {
        return Ok((Frontmatter::default(), body));
    }
    let frontmatter = serde_yaml::from_str(block)?;
    Ok((frontmatter, body))
}
