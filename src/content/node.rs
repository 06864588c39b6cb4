//! Content node types.
//!
//! A node is one record in the content index. Files on disk become `File`
//! nodes; transformers add typed children (`MarkdownRemark`, `Image`) that
//! point back at their file through `parent`.

use super::frontmatter::Frontmatter;
use std::{collections::BTreeMap, fmt};

/// Name of the derived field holding a post's route.
pub const SLUG_FIELD: &str = "slug";

/// Stable identifier of a node, assigned in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Type tag of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A file discovered under the content directory.
    File,
    /// A Markdown document parsed from a `File` node.
    MarkdownRemark,
    /// An image asset parsed from a `File` node.
    Image,
}

impl NodeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::MarkdownRemark => "MarkdownRemark",
            Self::Image => "Image",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record in the content index.
///
/// Everything except `fields` is fixed when the indexer creates the node.
/// Derived fields are attached later through [`NodeActions`](super::NodeActions).
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
    /// Path relative to the content root, `/` separated. Set on `File` nodes.
    pub relative_path: Option<String>,
    /// Markdown body with the frontmatter block removed.
    pub body: String,
    pub frontmatter: Option<Frontmatter>,
    pub fields: BTreeMap<String, String>,
}

impl Node {
    pub fn file(id: NodeId, relative_path: impl Into<String>) -> Self {
        Self {
            id,
            parent: None,
            kind: NodeKind::File,
            relative_path: Some(relative_path.into()),
            body: String::new(),
            frontmatter: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn markdown(id: NodeId, parent: NodeId, frontmatter: Frontmatter, body: String) -> Self {
        Self {
            id,
            parent: Some(parent),
            kind: NodeKind::MarkdownRemark,
            relative_path: None,
            body,
            frontmatter: Some(frontmatter),
            fields: BTreeMap::new(),
        }
    }

    pub fn image(id: NodeId, parent: NodeId) -> Self {
        Self {
            id,
            parent: Some(parent),
            kind: NodeKind::Image,
            relative_path: None,
            body: String::new(),
            frontmatter: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn slug(&self) -> Option<&str> {
        self.field(SLUG_FIELD)
    }

    pub fn is_draft(&self) -> bool {
        self.frontmatter.as_ref().is_some_and(|fm| fm.draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        assert_eq!(NodeKind::File.as_str(), "File");
        assert_eq!(NodeKind::MarkdownRemark.as_str(), "MarkdownRemark");
        assert_eq!(NodeKind::Image.to_string(), "Image");
    }

    #[test]
    fn test_slug_accessor() {
        let mut node = Node::file(NodeId(0), "posts/a.md");
        assert_eq!(node.slug(), None);
        node.fields.insert(SLUG_FIELD.into(), "/a/".into());
        assert_eq!(node.slug(), Some("/a/"));
    }

    #[test]
    fn test_draft_flag() {
        let fm = Frontmatter {
            draft: true,
            ..Frontmatter::titled("Draft")
        };
        let node = Node::markdown(NodeId(1), NodeId(0), fm, String::new());
        assert!(node.is_draft());
        assert!(!Node::file(NodeId(0), "x.md").is_draft());
    }
}
