//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── plan_site()
//!     │       ├── source::discover()     content dir → ContentIndex
//!     │       ├── annotate::run()        slug field on every post
//!     │       └── pages::create_pages()  one PageRequest per post, newest first
//!     │
//!     ├── render_pages()                 post pages in parallel → output/<slug>/index.html
//!     ├── render index listing           output/index.html
//!     └── feed::build_feed()             output/feed.xml when [build.rss] is enabled
//! ```

use crate::{
    annotate,
    config::SiteConfig,
    content::{ContentIndex, source},
    feed, log,
    logger::ProgressBars,
    pages::{self, PageCollector, PageRequest},
    render::{render_page, write_page},
};
use anyhow::{Context, Result, anyhow, bail};
use rayon::prelude::*;
use std::{
    fs,
    path::Path,
    sync::atomic::{AtomicBool, Ordering},
};

/// Annotated content plus the pages generated from it.
#[derive(Debug)]
pub struct Site {
    pub index: ContentIndex,
    pub pages: Vec<PageRequest>,
}

/// Index, annotate and generate routes without writing anything.
pub fn plan_site(config: &SiteConfig) -> Result<Site> {
    let content = &config.build.content;

    let mut index = source::discover(content)
        .with_context(|| format!("Failed to index {}", content.display()))?;
    log!("content"; "indexed {} nodes", index.len());

    let annotated = annotate::run(&mut index, &config.build.base_path)?;
    log!("annotate"; "{} posts annotated", annotated);

    let mut registry = PageCollector::new();
    pages::create_pages(&index, &mut registry, config)?;
    log!("pages"; "{} post pages", registry.pages().len());
    let pages = registry.into_pages();

    if let Some(page) = pages.iter().find(|page| page.route == "/") {
        bail!(
            "post with slug `{}` collides with the index listing; move it out of `{}`",
            page.route,
            config.build.base_path
        );
    }

    Ok(Site { index, pages })
}

/// Build the entire site.
///
/// If `config.build.clean` is true, clears the entire output directory first.
pub fn build_site(config: &SiteConfig) -> Result<Site> {
    let site = plan_site(config)?;
    let output = &config.build.output;

    prepare_output(output, config.build.clean)?;
    render_pages(&site, config)?;

    let listing = render_page(&site.index, &PageRequest::index(), config)
        .and_then(|page| write_page(&page, config))
        .context("Failed to render index listing")?;
    log!("render"; "{}", listing.display());

    feed::build_feed(&site.index, &site.pages, config)?;

    log_build_result(output, site.pages.len());
    Ok(site)
}

/// Render every post page in parallel; the first failure aborts the rest.
fn render_pages(site: &Site, config: &SiteConfig) -> Result<()> {
    log!("render"; "rendering {} pages...", site.pages.len());
    let progress = ProgressBars::new(&[("render", site.pages.len())]);
    let has_error = AtomicBool::new(false);

    let result = site.pages.par_iter().try_for_each(|request| {
        if has_error.load(Ordering::Relaxed) {
            return Err(anyhow!("Aborted"));
        }
        let written = render_page(&site.index, request, config)
            .and_then(|page| write_page(&page, config))
            .map_err(anyhow::Error::from);
        if let Err(e) = written {
            if !has_error.swap(true, Ordering::Relaxed) {
                log!("error"; "{}: {:#}", request.route, e);
            }
            return Err(anyhow!("Build failed"));
        }
        progress.inc_by_name("render");
        Ok(())
    });

    progress.finish();
    result
}

/// Create the output directory, removing it first when `clean` is set.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

fn log_build_result(output: &Path, page_count: usize) {
    if page_count == 0 {
        log!("warn"; "no posts found, only the index listing was written");
    }
    log!("build"; "done, output in {}", output.display());
}

/// Print every route a build would write.
pub fn print_routes(site: &Site) {
    let index = PageRequest::index();
    for page in std::iter::once(&index).chain(&site.pages) {
        println!("{} → {}", page.route, page.template);
    }
}
