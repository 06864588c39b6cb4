//! Query engine over the content index.
//!
//! A [`Query`] selects nodes of one kind, optionally filters them on a derived
//! field bound to a variable, sorts them and caps the result. Failures are
//! collected into [`QueryResult::errors`] rather than short-circuiting, and a
//! result with errors never carries data.

use super::{
    index::ContentIndex,
    node::{Node, NodeKind},
};
use crate::utils::date;
use chrono::{DateTime, Utc};
use std::{cmp::Ordering, collections::BTreeMap};
use thiserror::Error;

/// Named values a query's filter can refer to.
pub type Variables = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("variable `${0}` is used by the query but not provided")]
    UnboundVariable(String),

    #[error("cannot sort `{path}`: `{value}` is not a valid date")]
    InvalidDate { path: String, value: String },

    #[error("limit must be greater than zero")]
    InvalidLimit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `fields.<field> == $<var>`
    FieldEq { field: String, var: String },
}

/// Result ordering. Sorting is stable, so ties keep index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    /// `frontmatter.date`, newest first.
    DateDesc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub kind: NodeKind,
    pub filter: Option<Filter>,
    pub sort: Option<Sort>,
    pub limit: Option<usize>,
    pub include_drafts: bool,
}

impl Query {
    /// Every post, newest first, capped at `limit`.
    pub fn all_posts(limit: usize) -> Self {
        Self {
            kind: NodeKind::MarkdownRemark,
            filter: None,
            sort: Some(Sort::DateDesc),
            limit: Some(limit),
            include_drafts: false,
        }
    }

    /// The single post whose slug equals `$slug`.
    pub fn post_by_slug() -> Self {
        Self {
            kind: NodeKind::MarkdownRemark,
            filter: Some(Filter::FieldEq {
                field: super::SLUG_FIELD.into(),
                var: "slug".into(),
            }),
            sort: None,
            limit: Some(1),
            include_drafts: true,
        }
    }

    pub fn with_drafts(mut self, include: bool) -> Self {
        self.include_drafts = include;
        self
    }
}

#[derive(Debug, Default)]
pub struct QueryResult<'a> {
    pub data: Vec<&'a Node>,
    pub errors: Vec<QueryError>,
}

impl QueryResult<'_> {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Execute queries against annotated content.
pub trait QueryExecutor {
    fn query(&self, query: &Query, variables: &Variables) -> QueryResult<'_>;
}

impl QueryExecutor for ContentIndex {
    fn query(&self, query: &Query, variables: &Variables) -> QueryResult<'_> {
        let mut errors = Vec::new();

        if query.limit == Some(0) {
            errors.push(QueryError::InvalidLimit);
        }

        let bound = match &query.filter {
            Some(Filter::FieldEq { field, var }) => match variables.get(var) {
                Some(value) => Some((field.as_str(), value.as_str())),
                None => {
                    errors.push(QueryError::UnboundVariable(var.clone()));
                    None
                }
            },
            None => None,
        };

        let candidates = self
            .nodes_of_kind(query.kind)
            .filter(|n| query.include_drafts || !n.is_draft())
            .filter(|n| bound.is_none_or(|(field, value)| n.field(field) == Some(value)));

        let mut data: Vec<&Node> = match query.sort {
            Some(Sort::DateDesc) => {
                let mut keyed = Vec::new();
                for node in candidates {
                    match date_key(self, node) {
                        Ok(key) => keyed.push((key, node)),
                        Err(e) => errors.push(e),
                    }
                }
                keyed.sort_by(|(a, _), (b, _)| newest_first(a.as_ref(), b.as_ref()));
                keyed.into_iter().map(|(_, node)| node).collect()
            }
            None => candidates.collect(),
        };

        if !errors.is_empty() {
            return QueryResult {
                data: Vec::new(),
                errors,
            };
        }

        if let Some(limit) = query.limit {
            data.truncate(limit);
        }
        QueryResult { data, errors }
    }
}

fn date_key(index: &ContentIndex, node: &Node) -> Result<Option<DateTime<Utc>>, QueryError> {
    let Some(raw) = node.frontmatter.as_ref().and_then(|fm| fm.date.as_deref()) else {
        return Ok(None);
    };
    date::parse(raw).map(Some).ok_or_else(|| QueryError::InvalidDate {
        path: index.source_path(node).unwrap_or_default().to_owned(),
        value: raw.to_owned(),
    })
}

/// Dated nodes come before undated ones.
fn newest_first(a: Option<&DateTime<Utc>>, b: Option<&DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Frontmatter, NodeActions, SLUG_FIELD};

    fn add_post(index: &mut ContentIndex, path: &str, title: &str, date: Option<&str>) {
        let file = index.add_file(path);
        let fm = Frontmatter {
            date: date.map(str::to_owned),
            ..Frontmatter::titled(title)
        };
        let id = index.next_id();
        index.insert(Node::markdown(id, file, fm, String::new()));
        let stem = path.trim_end_matches(".md").rsplit('/').next().unwrap();
        index
            .create_node_field(id, SLUG_FIELD, format!("/{stem}/"))
            .unwrap();
    }

    fn titles(result: &QueryResult<'_>) -> Vec<String> {
        result
            .data
            .iter()
            .map(|n| n.frontmatter.as_ref().unwrap().title.clone())
            .collect()
    }

    #[test]
    fn test_all_posts_newest_first() {
        let mut index = ContentIndex::new();
        add_post(&mut index, "posts/a.md", "a", Some("2021-01-01"));
        add_post(&mut index, "posts/b.md", "b", Some("2021-06-15"));
        add_post(&mut index, "posts/c.md", "c", Some("2021-03-10"));

        let result = index.query(&Query::all_posts(1000), &Variables::new());
        assert!(result.is_ok());
        assert_eq!(titles(&result), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_equal_dates_keep_insertion_order() {
        let mut index = ContentIndex::new();
        add_post(&mut index, "posts/x.md", "x", Some("2021-01-01"));
        add_post(&mut index, "posts/y.md", "y", Some("2021-05-01"));
        add_post(&mut index, "posts/z.md", "z", Some("2021-01-01"));
        add_post(&mut index, "posts/w.md", "w", Some("2021-01-01"));

        let result = index.query(&Query::all_posts(1000), &Variables::new());
        assert_eq!(titles(&result), vec!["y", "x", "z", "w"]);
    }

    #[test]
    fn test_undated_posts_sort_last() {
        let mut index = ContentIndex::new();
        add_post(&mut index, "posts/u.md", "undated", None);
        add_post(&mut index, "posts/d.md", "dated", Some("2020-01-01"));

        let result = index.query(&Query::all_posts(1000), &Variables::new());
        assert_eq!(titles(&result), vec!["dated", "undated"]);
    }

    #[test]
    fn test_limit_caps_result() {
        let mut index = ContentIndex::new();
        for i in 1..=5 {
            add_post(&mut index, &format!("posts/p{i}.md"), &format!("p{i}"), Some(format!("2021-01-0{i}").as_str()));
        }

        let result = index.query(&Query::all_posts(2), &Variables::new());
        assert_eq!(titles(&result), vec!["p5", "p4"]);
    }

    #[test]
    fn test_zero_limit_is_an_error() {
        let index = ContentIndex::new();
        let result = index.query(&Query::all_posts(0), &Variables::new());
        assert_eq!(result.errors, vec![QueryError::InvalidLimit]);
    }

    #[test]
    fn test_invalid_date_reports_error_and_no_data() {
        let mut index = ContentIndex::new();
        add_post(&mut index, "posts/ok.md", "ok", Some("2021-01-01"));
        add_post(&mut index, "posts/bad.md", "bad", Some("last tuesday"));

        let result = index.query(&Query::all_posts(1000), &Variables::new());
        assert!(result.data.is_empty());
        assert_eq!(
            result.errors,
            vec![QueryError::InvalidDate {
                path: "posts/bad.md".into(),
                value: "last tuesday".into(),
            }]
        );
    }

    #[test]
    fn test_post_by_slug() {
        let mut index = ContentIndex::new();
        add_post(&mut index, "posts/a.md", "a", Some("2021-01-01"));
        add_post(&mut index, "posts/b.md", "b", Some("2021-06-15"));

        let vars = Variables::from([("slug".to_owned(), "/b/".to_owned())]);
        let result = index.query(&Query::post_by_slug(), &vars);
        assert_eq!(titles(&result), vec!["b"]);
    }

    #[test]
    fn test_unbound_variable() {
        let index = ContentIndex::new();
        let result = index.query(&Query::post_by_slug(), &Variables::new());
        assert_eq!(result.errors, vec![QueryError::UnboundVariable("slug".into())]);
    }

    #[test]
    fn test_drafts_excluded_unless_requested() {
        let mut index = ContentIndex::new();
        let file = index.add_file("posts/draft.md");
        let fm = Frontmatter {
            draft: true,
            ..Frontmatter::titled("draft")
        };
        let id = index.next_id();
        index.insert(Node::markdown(id, file, fm, String::new()));

        let hidden = index.query(&Query::all_posts(10), &Variables::new());
        assert!(hidden.data.is_empty());

        let shown = index.query(&Query::all_posts(10).with_drafts(true), &Variables::new());
        assert_eq!(titles(&shown), vec!["draft"]);
    }

    #[test]
    fn test_only_requested_kind_is_returned() {
        let mut index = ContentIndex::new();
        let file = index.add_file("posts/cover.png");
        let id = index.next_id();
        index.insert(Node::image(id, file));
        add_post(&mut index, "posts/a.md", "a", None);

        let result = index.query(&Query::all_posts(10), &Variables::new());
        assert_eq!(result.data.len(), 1);
        assert_eq!(result.data[0].kind, NodeKind::MarkdownRemark);
    }
}
