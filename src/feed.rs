//! RSS feed generation.
//!
//! Built from the generated post pages, so the feed lists exactly the posts
//! the site publishes, in the same order.

use crate::{
    config::SiteConfig,
    content::{ContentIndex, Query, QueryExecutor},
    log,
    pages::PageRequest,
    render::markdown,
    utils::{
        date,
        minify::{MinifyType, minify},
    },
};
use anyhow::{Context, Result, anyhow};
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, Item, ItemBuilder, validation::Validate};
use std::{fs, path::PathBuf};

/// Write the feed when `[build.rss]` is enabled. Returns the file written.
pub fn build_feed(
    index: &ContentIndex,
    pages: &[PageRequest],
    config: &SiteConfig,
) -> Result<Option<PathBuf>> {
    if !config.build.rss.enable {
        return Ok(None);
    }

    let xml = feed_xml(index, pages, config)?;
    let path = config.build.output.join(&config.build.rss.path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, minify(MinifyType::Xml(xml.as_bytes()), config))
        .with_context(|| format!("writing feed to {}", path.display()))?;

    log!("feed"; "{} items written to {}", pages.len(), config.build.rss.path.display());
    Ok(Some(path))
}

fn feed_xml(index: &ContentIndex, pages: &[PageRequest], config: &SiteConfig) -> Result<String> {
    let base_url = config
        .base
        .url
        .as_deref()
        .context("[base.url] is required for RSS generation")?
        .trim_end_matches('/');

    let items = pages
        .iter()
        .map(|page| item(index, page, base_url, config))
        .collect::<Result<Vec<_>>>()?;

    let channel = ChannelBuilder::default()
        .title(config.base.title.clone())
        .link(format!("{base_url}/"))
        .description(config.base.description.clone())
        .language(config.base.language.clone())
        .generator(concat!("folio ", env!("CARGO_PKG_VERSION")).to_owned())
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("rss validate: {e}"))?;

    Ok(channel.to_string())
}

fn item(index: &ContentIndex, page: &PageRequest, base_url: &str, config: &SiteConfig) -> Result<Item> {
    let result = index.query(&Query::post_by_slug(), &page.variables());
    let post = result
        .data
        .first()
        .ok_or_else(|| anyhow!("no post for feed entry `{}`", page.route))?;
    let fm = post
        .frontmatter
        .as_ref()
        .ok_or_else(|| anyhow!("post `{}` has no frontmatter", page.route))?;

    let link = format!("{base_url}{}", page.route);
    let description = fm
        .description
        .clone()
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| markdown::excerpt(&post.body, config.build.excerpt_length));
    let pub_date = fm
        .date
        .as_deref()
        .and_then(date::parse)
        .map(|d| d.to_rfc2822());
    let categories = fm
        .tags
        .iter()
        .map(|tag| CategoryBuilder::default().name(tag.clone()).build())
        .collect::<Vec<_>>();

    Ok(ItemBuilder::default()
        .title(fm.title.clone())
        .link(link.clone())
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(description)
        .pub_date(pub_date)
        .categories(categories)
        .build())
}
