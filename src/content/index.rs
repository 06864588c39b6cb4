//! In-memory content index.
//!
//! Nodes are stored in insertion order and addressed by [`NodeId`], which is
//! the node's position. The index is written by the source walker and by
//! field attachment; everything after the annotate phase only reads it.

use super::node::{Node, NodeId, NodeKind};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("field `{name}` of node {node} is already `{existing}`, refusing to set `{value}`")]
    FieldConflict {
        node: NodeId,
        name: String,
        existing: String,
        value: String,
    },
}

/// Resolve node identifiers to nodes.
pub trait NodeLookup {
    fn get_node(&self, id: NodeId) -> Option<&Node>;
}

/// Attach derived fields to nodes.
pub trait NodeActions {
    /// Attach `name = value` to a node.
    ///
    /// Setting a field to the value it already holds is a no-op. A field is
    /// never overwritten with a different value.
    fn create_node_field(&mut self, id: NodeId, name: &str, value: String) -> Result<(), IndexError>;
}

#[derive(Debug, Default)]
pub struct ContentIndex {
    nodes: Vec<Node>,
}

impl ContentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next inserted node will receive.
    pub fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len() as u32)
    }

    /// Insert a node built with [`next_id`](Self::next_id).
    pub fn insert(&mut self, node: Node) -> NodeId {
        debug_assert_eq!(node.id, self.next_id(), "node ids must follow insertion order");
        let id = node.id;
        self.nodes.push(node);
        id
    }

    /// Insert a `File` node for a content-relative path.
    pub fn add_file(&mut self, relative_path: impl Into<String>) -> NodeId {
        let id = self.next_id();
        self.insert(Node::file(id, relative_path))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Relative path of the file a node was created from.
    ///
    /// `File` nodes answer for themselves; children answer through their parent.
    pub fn source_path<'a>(&'a self, node: &'a Node) -> Option<&'a str> {
        match node.kind {
            NodeKind::File => node.relative_path.as_deref(),
            _ => node
                .parent
                .and_then(|id| self.get_node(id))
                .and_then(|parent| parent.relative_path.as_deref()),
        }
    }
}

impl NodeLookup for ContentIndex {
    fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }
}

impl NodeActions for ContentIndex {
    fn create_node_field(&mut self, id: NodeId, name: &str, value: String) -> Result<(), IndexError> {
        let node = self
            .nodes
            .get_mut(id.0 as usize)
            .ok_or(IndexError::UnknownNode(id))?;

        match node.fields.get(name) {
            Some(existing) if *existing == value => Ok(()),
            Some(existing) => Err(IndexError::FieldConflict {
                node: id,
                name: name.to_owned(),
                existing: existing.clone(),
                value,
            }),
            None => {
                node.fields.insert(name.to_owned(), value);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::frontmatter::Frontmatter;

    fn index_with_post() -> (ContentIndex, NodeId, NodeId) {
        let mut index = ContentIndex::new();
        let file = index.add_file("posts/a.md");
        let id = index.next_id();
        let post = index.insert(Node::markdown(id, file, Frontmatter::titled("A"), String::new()));
        (index, file, post)
    }

    #[test]
    fn test_ids_follow_insertion_order() {
        let (index, file, post) = index_with_post();
        assert_eq!(file, NodeId(0));
        assert_eq!(post, NodeId(1));
        assert_eq!(index.len(), 2);
        assert_eq!(index.get_node(post).unwrap().parent, Some(file));
    }

    #[test]
    fn test_source_path_through_parent() {
        let (index, file, post) = index_with_post();
        let post = index.get_node(post).unwrap();
        let file = index.get_node(file).unwrap();
        assert_eq!(index.source_path(post), Some("posts/a.md"));
        assert_eq!(index.source_path(file), Some("posts/a.md"));
    }

    #[test]
    fn test_create_field_is_idempotent() {
        let (mut index, _, post) = index_with_post();
        index.create_node_field(post, "slug", "/a/".into()).unwrap();
        index.create_node_field(post, "slug", "/a/".into()).unwrap();
        assert_eq!(index.get_node(post).unwrap().slug(), Some("/a/"));
    }

    #[test]
    fn test_create_field_conflict() {
        let (mut index, _, post) = index_with_post();
        index.create_node_field(post, "slug", "/a/".into()).unwrap();
        let err = index
            .create_node_field(post, "slug", "/b/".into())
            .unwrap_err();
        assert!(matches!(err, IndexError::FieldConflict { .. }));
        assert_eq!(index.get_node(post).unwrap().slug(), Some("/a/"));
    }

    #[test]
    fn test_create_field_unknown_node() {
        let mut index = ContentIndex::new();
        let err = index
            .create_node_field(NodeId(7), "slug", "/x/".into())
            .unwrap_err();
        assert_eq!(err, IndexError::UnknownNode(NodeId(7)));
    }

    #[test]
    fn test_nodes_of_kind() {
        let (index, _, _) = index_with_post();
        assert_eq!(index.nodes_of_kind(NodeKind::MarkdownRemark).count(), 1);
        assert_eq!(index.nodes_of_kind(NodeKind::Image).count(), 0);
    }
}
