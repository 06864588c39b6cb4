//! Page route generation.
//!
//! Turns the annotated content index into page requests: one query for every
//! post, one [`PageRequest`] per result, registered in query order.
//!
//! ```text
//! create_pages()
//!     │
//!     ├── query(all_posts)  ──► errors? ──► abort, nothing registered
//!     │
//!     ├── build requests    ──► missing slug? ──► abort, nothing registered
//!     │
//!     └── registry.create_page(request) for each, newest first
//! ```

use crate::{
    config::SiteConfig,
    content::{Node, Query, QueryError, QueryExecutor, SLUG_FIELD, Variables},
    log,
};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Template a page is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    BlogPost,
    Index,
}

impl Template {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BlogPost => "blog-post",
            Self::Index => "index",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instruction to materialize one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub route: String,
    pub template: Template,
    /// Passed to the template, which re-queries its data from it.
    pub context: Map<String, Value>,
}

impl PageRequest {
    /// Request for a post page. The context carries the slug.
    pub fn blog_post(slug: &str) -> Self {
        let mut context = Map::new();
        context.insert(SLUG_FIELD.to_owned(), Value::String(slug.to_owned()));
        Self {
            route: slug.to_owned(),
            template: Template::BlogPost,
            context,
        }
    }

    /// Request for the post listing at `/`.
    pub fn index() -> Self {
        Self {
            route: "/".to_owned(),
            template: Template::Index,
            context: Map::new(),
        }
    }

    /// Slug carried in the context.
    pub fn slug(&self) -> Option<&str> {
        self.context.get(SLUG_FIELD).and_then(Value::as_str)
    }

    /// Context as query variables (string values only).
    pub fn variables(&self) -> Variables {
        self.context
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_owned())))
            .collect()
    }
}

/// Accepts page requests and schedules them for rendering.
pub trait PageRegistry {
    fn create_page(&mut self, request: PageRequest);
}

/// Registry that keeps requests in registration order.
#[derive(Debug, Default)]
pub struct PageCollector {
    pages: Vec<PageRequest>,
}

impl PageCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[PageRequest] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<PageRequest> {
        self.pages
    }
}

impl PageRegistry for PageCollector {
    fn create_page(&mut self, request: PageRequest) {
        self.pages.push(request);
    }
}

#[derive(Debug, Error)]
pub enum PageGenError {
    #[error("post query failed with {} error(s)", .0.len())]
    Query(Vec<QueryError>),

    #[error("post `{0}` has no slug; was the annotate phase skipped?")]
    MissingSlug(String),
}

/// Query every post and register one blog-post page for each.
///
/// Fails without registering anything if the query reports errors or a post
/// lacks a slug.
pub fn create_pages<Q, R>(
    executor: &Q,
    registry: &mut R,
    config: &SiteConfig,
) -> Result<Vec<PageRequest>, PageGenError>
where
    Q: QueryExecutor,
    R: PageRegistry,
{
    let query = Query::all_posts(config.build.limit).with_drafts(config.build.drafts);
    let result = executor.query(&query, &Variables::new());

    if !result.is_ok() {
        for error in &result.errors {
            log!("error"; "{}", error);
        }
        return Err(PageGenError::Query(result.errors));
    }

    let requests = result
        .data
        .iter()
        .map(|node| {
            node.slug()
                .map(PageRequest::blog_post)
                .ok_or_else(|| PageGenError::MissingSlug(post_label(node)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for request in &requests {
        registry.create_page(request.clone());
    }

    Ok(requests)
}

fn post_label(node: &Node) -> String {
    node.frontmatter
        .as_ref()
        .map(|fm| fm.title.clone())
        .unwrap_or_else(|| node.id.to_string())
}
