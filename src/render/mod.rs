//! Page rendering.
//!
//! Each [`PageRequest`] is rendered by its template into a full HTML
//! document, then written to `output/<route>/index.html` together with any
//! assets the page references.
//!
//! ```text
//! render_page(request)
//!     │
//!     ├── BlogPost ──► post::render()     re-query by $slug, markdown → html
//!     └── Index    ──► listing::render()  all posts, newest first, excerpts
//!
//! write_page(page) ──► minify ──► output/<route>/index.html (+ assets)
//! ```

mod layout;
mod listing;
pub mod markdown;
mod post;
mod seo;

use crate::{
    config::SiteConfig,
    content::{ContentIndex, QueryError},
    pages::{PageRequest, Template},
    utils::{
        minify::{MinifyType, minify},
        slug::route_to_output,
    },
};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("query for `{route}` failed: {}", join(.errors))]
    Query {
        route: String,
        errors: Vec<QueryError>,
    },

    #[error("no post has slug `{0}`")]
    PostNotFound(String),

    #[error("failed to write `{0}`")]
    Io(PathBuf, #[source] io::Error),
}

fn join(errors: &[QueryError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A file copied next to a rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub source: PathBuf,
    /// Site-absolute URL the page links it under.
    pub url: String,
}

/// Rendered document, not yet written.
#[derive(Debug)]
pub struct RenderedPage {
    pub route: String,
    pub html: String,
    pub assets: Vec<Asset>,
}

/// Render a request with the template it names.
pub fn render_page(
    index: &ContentIndex,
    request: &PageRequest,
    config: &SiteConfig,
) -> Result<RenderedPage, RenderError> {
    match request.template {
        Template::BlogPost => post::render(index, request, config),
        Template::Index => listing::render(index, request, config),
    }
}

/// Write a rendered page and its assets under the output directory.
///
/// Returns the path of the HTML file.
pub fn write_page(page: &RenderedPage, config: &SiteConfig) -> Result<PathBuf, RenderError> {
    let output = &config.build.output;
    let path = route_to_output(output, &page.route);

    let html = minify(MinifyType::Html(page.html.as_bytes()), config);
    write_file(&path, &html)?;

    for asset in &page.assets {
        let dest = url_to_output(output, &asset.url);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| RenderError::Io(parent.to_path_buf(), e))?;
        }
        fs::copy(&asset.source, &dest).map_err(|e| RenderError::Io(dest.clone(), e))?;
    }

    Ok(path)
}

pub(crate) fn write_file(path: &Path, contents: &[u8]) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| RenderError::Io(parent.to_path_buf(), e))?;
    }
    fs::write(path, contents).map_err(|e| RenderError::Io(path.to_path_buf(), e))
}

fn url_to_output(output: &Path, url: &str) -> PathBuf {
    url.split('/')
        .filter(|s| !s.is_empty())
        .fold(output.to_path_buf(), |path, segment| path.join(segment))
}
