//! URL slugification and route/path mapping.

use std::path::{Path, PathBuf};

/// Convert one path segment to a URL-safe slug.
///
/// Non-ASCII text is transliterated, then every run of characters outside
/// `[a-z0-9]` collapses into a single `-`.
///
/// | Input           | Output        |
/// |-----------------|---------------|
/// | `Hello World`   | `hello-world` |
/// | `Crème Brûlée`  | `creme-brulee`|
/// | `你好`          | `ni-hao`      |
/// | `2021.01.01`    | `2021-01-01`  |
pub fn slugify(text: &str) -> String {
    let ascii = deunicode::deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Join slug segments into a route: `["a", "b"]` → `"/a/b/"`, `[]` → `"/"`.
pub fn route_from_segments<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut route = String::from("/");
    for segment in segments {
        let segment = segment.as_ref();
        if segment.is_empty() {
            continue;
        }
        route.push_str(segment);
        route.push('/');
    }
    route
}

/// Output HTML file for a route.
///
/// | Route      | Output                          |
/// |------------|---------------------------------|
/// | `/`        | `public/index.html`             |
/// | `/a/b/`    | `public/a/b/index.html`         |
pub fn route_to_output(output: &Path, route: &str) -> PathBuf {
    route
        .split('/')
        .filter(|s| !s.is_empty())
        .fold(output.to_path_buf(), |path, segment| path.join(segment))
        .join("index.html")
}
