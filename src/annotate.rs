//! Content node annotation: attaches the `slug` field to every post.
//!
//! A post's slug is derived from the path of the file it was parsed from,
//! relative to the posts base path:
//!
//! | File (relative to content)  | base_path | slug             |
//! |-----------------------------|-----------|------------------|
//! | `posts/a.md`                | `posts`   | `/a/`            |
//! | `posts/2021/Hello World.md` | `posts`   | `/2021/hello-world/` |
//! | `posts/trip/index.md`       | `posts`   | `/trip/`         |
//! | `notes/b.md`                | `posts`   | `/notes/b/`      |
//!
//! Derivation is pure given path and base path, so annotating twice yields
//! the same fields.

use crate::{
    content::{
        ContentIndex, IndexError, Node, NodeActions, NodeId, NodeKind, NodeLookup, SLUG_FIELD,
    },
    utils::slug::{route_from_segments, slugify},
};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnnotateError {
    #[error("markdown node {0} has no parent file node")]
    MissingFileNode(NodeId),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("`{first}` and `{second}` both map to route `{slug}`")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },
}

/// Compute the slug for a node, or `None` when the node is not a post.
pub fn derive_slug<L: NodeLookup>(
    node: &Node,
    lookup: &L,
    base_path: &str,
) -> Result<Option<String>, AnnotateError> {
    if node.kind != NodeKind::MarkdownRemark {
        return Ok(None);
    }

    let relative = node
        .parent
        .and_then(|id| lookup.get_node(id))
        .filter(|parent| parent.kind == NodeKind::File)
        .and_then(|parent| parent.relative_path.as_deref())
        .ok_or(AnnotateError::MissingFileNode(node.id))?;

    Ok(Some(file_path_slug(relative, base_path)))
}

/// Annotate a single node in place. Non-post nodes are left untouched.
pub fn on_create_node<I>(index: &mut I, id: NodeId, base_path: &str) -> Result<(), AnnotateError>
where
    I: NodeLookup + NodeActions,
{
    let node = index.get_node(id).ok_or(IndexError::UnknownNode(id))?;
    if let Some(slug) = derive_slug(node, &*index, base_path)? {
        index.create_node_field(id, SLUG_FIELD, slug)?;
    }
    Ok(())
}

/// Annotate every node of the index, in index order, then check slugs are
/// unique. Returns the number of annotated posts.
pub fn run(index: &mut ContentIndex, base_path: &str) -> Result<usize, AnnotateError> {
    let ids: Vec<NodeId> = index.nodes().iter().map(|node| node.id).collect();
    for id in ids {
        on_create_node(index, id, base_path)?;
    }

    check_unique(index)?;
    Ok(index
        .nodes_of_kind(NodeKind::MarkdownRemark)
        .filter(|node| node.slug().is_some())
        .count())
}

fn check_unique(index: &ContentIndex) -> Result<(), AnnotateError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();

    for node in index.nodes_of_kind(NodeKind::MarkdownRemark) {
        let Some(slug) = node.slug() else { continue };
        let path = index.source_path(node).unwrap_or_default();
        if let Some(first) = seen.insert(slug, path) {
            return Err(AnnotateError::DuplicateSlug {
                slug: slug.to_owned(),
                first: first.to_owned(),
                second: path.to_owned(),
            });
        }
    }
    Ok(())
}

/// Route for a content-relative file path.
///
/// The base path prefix is stripped when present, the extension dropped, an
/// `index` stem collapsed into its directory, and every segment slugified.
pub fn file_path_slug(relative_path: &str, base_path: &str) -> String {
    let relative = relative_path.trim_start_matches('/');
    let base = base_path.trim_matches('/');
    let relative = if base.is_empty() {
        relative
    } else {
        relative
            .strip_prefix(base)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(relative)
    };

    let mut segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
    if let Some(file) = segments.pop() {
        let stem = file
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .filter(|stem| !stem.is_empty())
            .unwrap_or(file);
        if !stem.eq_ignore_ascii_case("index") {
            segments.push(stem);
        }
    }

    route_from_segments(segments.into_iter().map(slugify))
}
