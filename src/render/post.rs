//! `blog-post` template.

use super::{Asset, RenderError, RenderedPage, layout, markdown, seo};
use crate::{
    config::SiteConfig,
    content::{ContentIndex, Frontmatter, Query, QueryExecutor},
    pages::PageRequest,
    utils::date,
};
use maud::{Markup, PreEscaped, html};
use std::path::Path;

/// Render one post. The post is fetched again by the request's `$slug`.
pub fn render(
    index: &ContentIndex,
    request: &PageRequest,
    config: &SiteConfig,
) -> Result<RenderedPage, RenderError> {
    let result = index.query(&Query::post_by_slug(), &request.variables());
    if !result.is_ok() {
        return Err(RenderError::Query {
            route: request.route.clone(),
            errors: result.errors,
        });
    }
    let Some(post) = result.data.first() else {
        return Err(RenderError::PostNotFound(
            request.slug().unwrap_or(&request.route).to_owned(),
        ));
    };

    let default_fm = Frontmatter::default();
    let fm = post.frontmatter.as_ref().unwrap_or(&default_fm);
    let source = index.source_path(post).unwrap_or_default();
    let hero = fm
        .image
        .as_deref()
        .map(|image| hero_image(image, source, &request.route, &config.build.content));

    let head = seo::head(
        &seo::Seo {
            title: &fm.title,
            description: fm.description.as_deref(),
            image: hero.as_ref().map(|(url, _)| url.as_str()),
            keywords: &fm.tags,
        },
        config,
    );
    let body = article(fm, hero.as_ref().map(|(url, _)| url.as_str()), &markdown::to_html(&post.body));

    Ok(RenderedPage {
        route: request.route.clone(),
        html: layout::page(config, head, body).into_string(),
        assets: hero.and_then(|(_, asset)| asset).into_iter().collect(),
    })
}

fn article(fm: &Frontmatter, image: Option<&str>, body_html: &str) -> Markup {
    let published = fm.date.as_deref().and_then(date::parse);

    html! {
        article class="blog-post" {
            h1 class="title" { (fm.title) }
            @if let Some(published) = published {
                time class="date" datetime=(date::format_iso(&published)) {
                    (date::format_long(&published))
                }
            }
            @if let Some(src) = image {
                img class="hero" src=(src) alt=(fm.title);
            }
            @if let (Some(credit), Some(author)) = (&fm.image_credit, &fm.image_author) {
                p class="image-credit" {
                    "Image by "
                    a rel="noopener noreferrer" target="_blank" href=(credit) { (author) }
                }
            }
            div class="content" { (PreEscaped(body_html)) }
        }
    }
}

/// URL of a post's hero image, plus the file to copy when it is local.
///
/// Absolute paths and URLs are used as written. Relative paths resolve
/// against the post's directory and are published under the post's route.
fn hero_image(image: &str, source: &str, route: &str, content: &Path) -> (String, Option<Asset>) {
    if image.starts_with('/') || image.contains("://") {
        return (image.to_owned(), None);
    }

    let relative = image.trim_start_matches("./");
    if relative.split('/').any(|segment| segment == "..") {
        return (image.to_owned(), None);
    }

    let post_dir = Path::new(source).parent().unwrap_or(Path::new(""));
    let url = format!("{route}{relative}");
    let asset = Asset {
        source: content.join(post_dir).join(relative),
        url: url.clone(),
    };
    (url, Some(asset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{annotate, content::Node};
    use std::path::PathBuf;

    fn index_with(path: &str, fm: Frontmatter, body: &str) -> ContentIndex {
        let mut index = ContentIndex::new();
        let file = index.add_file(path);
        let id = index.next_id();
        index.insert(Node::markdown(id, file, fm, body.into()));
        annotate::run(&mut index, "posts").unwrap();
        index
    }

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.title = "Notes".into();
        config.build.content = PathBuf::from("/site/content");
        config
    }

    #[test]
    fn test_render_post() {
        let fm = Frontmatter {
            date: Some("2021-06-05".into()),
            description: Some("All about hello".into()),
            tags: vec!["rust".into()],
            ..Frontmatter::titled("Hello World")
        };
        let index = index_with("posts/hello.md", fm, "## Intro\n\nBody text.");
        let page = render(&index, &PageRequest::blog_post("/hello/"), &config()).unwrap();

        assert_eq!(page.route, "/hello/");
        assert!(page.html.contains("<title>Hello World | Notes</title>"));
        assert!(page.html.contains(r#"<h1 class="title">Hello World</h1>"#));
        assert!(page.html.contains(r#"<time class="date" datetime="2021-06-05">June 05, 2021</time>"#));
        assert!(page.html.contains(r#"<h2 id="intro">"#));
        assert!(page.html.contains(r#"<meta name="keywords" content="rust">"#));
        assert!(page.html.contains(r#"content="All about hello""#));
        assert!(!page.html.contains("hero"));
        assert!(!page.html.contains("Image by"));
        assert!(page.assets.is_empty());
    }

    #[test]
    fn test_unknown_slug() {
        let index = index_with("posts/hello.md", Frontmatter::titled("Hello"), "");
        let err = render(&index, &PageRequest::blog_post("/nope/"), &config()).unwrap_err();
        assert!(matches!(err, RenderError::PostNotFound(ref route) if route == "/nope/"));
    }

    #[test]
    fn test_request_without_slug_is_query_error() {
        let index = index_with("posts/hello.md", Frontmatter::titled("Hello"), "");
        let err = render(&index, &PageRequest::index(), &config()).unwrap_err();
        assert!(matches!(err, RenderError::Query { .. }));
    }

    #[test]
    fn test_drafts_still_render_by_slug() {
        let fm = Frontmatter {
            draft: true,
            ..Frontmatter::titled("Wip")
        };
        let index = index_with("posts/wip.md", fm, "");
        assert!(render(&index, &PageRequest::blog_post("/wip/"), &config()).is_ok());
    }

    #[test]
    fn test_hero_image_and_credit() {
        let fm = Frontmatter {
            image: Some("./cover.jpg".into()),
            image_credit: Some("https://unsplash.com/photo".into()),
            image_author: Some("Jane".into()),
            ..Frontmatter::titled("Hello")
        };
        let index = index_with("posts/2021/hello.md", fm, "");
        let page = render(&index, &PageRequest::blog_post("/2021/hello/"), &config()).unwrap();

        assert!(page.html.contains(r#"<img class="hero" src="/2021/hello/cover.jpg""#));
        assert!(page.html.contains(r#"content="/2021/hello/cover.jpg""#));
        assert!(page.html.contains(
            r#"Image by <a rel="noopener noreferrer" target="_blank" href="https://unsplash.com/photo">Jane</a>"#
        ));
        assert_eq!(
            page.assets,
            vec![Asset {
                source: PathBuf::from("/site/content/posts/2021/cover.jpg"),
                url: "/2021/hello/cover.jpg".into(),
            }]
        );
    }

    #[test]
    fn test_credit_needs_both_link_and_author() {
        let fm = Frontmatter {
            image_author: Some("Jane".into()),
            ..Frontmatter::titled("Hello")
        };
        let index = index_with("posts/hello.md", fm, "");
        let page = render(&index, &PageRequest::blog_post("/hello/"), &config()).unwrap();
        assert!(!page.html.contains("Image by"));
    }

    #[test]
    fn test_hero_image_paths() {
        let content = Path::new("/c");
        assert_eq!(
            hero_image("/img/a.png", "posts/a.md", "/a/", content),
            ("/img/a.png".to_string(), None)
        );
        assert_eq!(
            hero_image("https://cdn.dev/a.png", "posts/a.md", "/a/", content),
            ("https://cdn.dev/a.png".to_string(), None)
        );
        assert_eq!(
            hero_image("../shared/a.png", "posts/a.md", "/a/", content),
            ("../shared/a.png".to_string(), None)
        );

        let (url, asset) = hero_image("img/a.png", "posts/a.md", "/a/", content);
        assert_eq!(url, "/a/img/a.png");
        assert_eq!(asset.unwrap().source, PathBuf::from("/c/posts/img/a.png"));
    }
}
