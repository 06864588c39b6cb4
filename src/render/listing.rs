//! `index` template: the post listing at `/`.

use super::{RenderError, RenderedPage, layout, markdown, seo};
use crate::{
    config::SiteConfig,
    content::{ContentIndex, Node, Query, QueryExecutor},
    pages::PageRequest,
    utils::date,
};
use maud::{Markup, html};

pub fn render(
    index: &ContentIndex,
    request: &PageRequest,
    config: &SiteConfig,
) -> Result<RenderedPage, RenderError> {
    let query = Query::all_posts(config.build.limit).with_drafts(config.build.drafts);
    let result = index.query(&query, &request.variables());
    if !result.is_ok() {
        return Err(RenderError::Query {
            route: request.route.clone(),
            errors: result.errors,
        });
    }

    let head = seo::head(
        &seo::Seo {
            title: "Home",
            ..seo::Seo::default()
        },
        config,
    );
    let body = html! {
        section class="intro" {
            @if let Some(avatar) = &config.base.avatar {
                img class="avatar" src=(avatar) alt=(config.base.author);
            }
            h2 { "Hello!" }
            p { (config.base.description) }
        }
        section class="posts" {
            h2 { "Blog" }
            @for post in &result.data {
                (entry(post, config.build.excerpt_length))
            }
        }
    };

    Ok(RenderedPage {
        route: request.route.clone(),
        html: layout::page(config, head, body).into_string(),
        assets: Vec::new(),
    })
}

fn entry(post: &Node, excerpt_length: usize) -> Markup {
    let slug = post.slug().unwrap_or("/");
    let title = post.frontmatter.as_ref().map_or("", |fm| fm.title.as_str());
    let published = post
        .frontmatter
        .as_ref()
        .and_then(|fm| fm.date.as_deref())
        .and_then(date::parse);

    html! {
        div class="post" {
            a href=(slug) { h3 { (title) } }
            @if let Some(published) = published {
                span class="date" { (date::format_listing(&published)) }
            }
            p {
                (markdown::excerpt(&post.body, excerpt_length)) " "
                a href=(slug) { "Read more" }
            }
        }
    }
}
