//! Content index: discovered files, the documents parsed from them, and the
//! query surface the page pipeline reads through.
//!
//! # Node Graph
//!
//! ```text
//! File("posts/a.md") ──parent── MarkdownRemark { frontmatter, body, fields.slug }
//! File("posts/a.png") ─parent── Image
//! ```
//!
//! The indexer creates every node up front. The annotate phase attaches
//! derived fields, after which the index is read-only.

mod frontmatter;
mod index;
mod node;
pub mod query;
pub mod source;

pub use frontmatter::Frontmatter;
pub use index::{ContentIndex, IndexError, NodeActions, NodeLookup};
pub use node::{Node, NodeId, NodeKind, SLUG_FIELD};
pub use query::{Query, QueryError, QueryExecutor, Variables};
