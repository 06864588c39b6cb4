//! Site initialization module.
//!
//! Creates a new site: `folio.toml`, a sample post and a `.gitignore`.

use crate::config::SiteConfig;
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

const CONFIG_TEMPLATE: &str = r#"[base]
title = "My Blog"
description = "Notes on tech, web development and whatever else comes up."
author = "<YOUR_NAME>"
# url = "https://example.com"

[[base.nav]]
label = "Blog"
url = "/blog"

[[base.nav]]
label = "About Me"
url = "/me"

[build]
content = "content"
output = "public"
base_path = "posts"

[build.rss]
enable = false
"#;

const SAMPLE_POST: &str = "---
title: Hello World
date: 2021-01-01
description: The first post.
tags: [hello]
---

Welcome to your new blog. Edit or delete this post, then run `folio build`.
";

/// Create a new site at the configured root.
///
/// Without a name the current directory must be empty.
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `folio init <SITE_NAME>` to create in a subdirectory."
        );
    }

    let posts = config.posts_dir();
    if posts.exists() {
        bail!(
            "Path `{}` already exists. Try `folio init <SITE_NAME>` instead.",
            posts.display()
        );
    }
    fs::create_dir_all(&posts).with_context(|| format!("Failed to create {}", posts.display()))?;

    fs::write(&config.config_path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", config.config_path.display()))?;
    fs::write(posts.join("hello-world.md"), SAMPLE_POST)?;
    init_ignored_files(root, &config.build.output)?;

    crate::log!("init"; "new site at {}", root.display());
    Ok(())
}

fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Ignore the build output, relative to the site root when possible.
fn init_ignored_files(root: &Path, output: &Path) -> Result<()> {
    let path = root.join(".gitignore");
    if path.exists() {
        return Ok(());
    }
    let output = output.strip_prefix(root).unwrap_or(output);
    fs::write(&path, format!("/{}\n", output.display()))?;
    Ok(())
}
