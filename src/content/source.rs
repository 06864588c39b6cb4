//! Filesystem source: walks the content directory and fills a [`ContentIndex`].
//!
//! Every file becomes a `File` node. Markdown files get a `MarkdownRemark`
//! child carrying parsed frontmatter and body, images get an `Image` child.

use super::{
    frontmatter,
    index::ContentIndex,
    node::Node,
};
use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg", "avif"];

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("content directory `{0}` not found")]
    MissingRoot(PathBuf),

    #[error("failed to walk content directory")]
    Walk(#[from] walkdir::Error),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("invalid frontmatter in `{0}`")]
    Frontmatter(PathBuf, #[source] serde_yaml::Error),
}

/// Walk `root` and index everything below it.
///
/// Entries are visited sorted by file name so node ids are stable across runs.
pub fn discover(root: &Path) -> Result<ContentIndex, SourceError> {
    if !root.is_dir() {
        return Err(SourceError::MissingRoot(root.to_path_buf()));
    }

    let mut index = ContentIndex::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(relative) = relative_path(root, path) else {
            continue;
        };

        let file = index.add_file(relative);
        match extension(path).as_deref() {
            Some(ext) if MARKDOWN_EXTENSIONS.contains(&ext) => {
                let content = std::fs::read_to_string(path)
                    .map_err(|e| SourceError::Io(path.to_path_buf(), e))?;
                let (mut fm, body) = frontmatter::parse(&content)
                    .map_err(|e| SourceError::Frontmatter(path.to_path_buf(), e))?;
                if fm.title.trim().is_empty() {
                    fm.title = file_stem(path);
                }
                let id = index.next_id();
                index.insert(Node::markdown(id, file, fm, body.to_owned()));
            }
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => {
                let id = index.next_id();
                index.insert(Node::image(id, file));
            }
            _ => {}
        }
    }

    Ok(index)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `root/posts/a.md` → `"posts/a.md"`, always `/` separated.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Some(parts.join("/"))
}
