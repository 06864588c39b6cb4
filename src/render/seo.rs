//! `<head>` metadata shared by every page.

use crate::config::SiteConfig;
use maud::{Markup, html};

/// Per-page inputs to the head tags.
#[derive(Debug, Default)]
pub struct Seo<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    /// Social preview image. Falls back to the site avatar.
    pub image: Option<&'a str>,
    pub keywords: &'a [String],
}

impl Seo<'_> {
    fn full_title(&self, config: &SiteConfig) -> String {
        if config.base.title.is_empty() {
            self.title.to_owned()
        } else {
            format!("{} | {}", self.title, config.base.title)
        }
    }
}

/// Title, description, Open Graph and Twitter card tags.
pub fn head(seo: &Seo, config: &SiteConfig) -> Markup {
    let title = seo.full_title(config);
    let description = seo
        .description
        .filter(|d| !d.is_empty())
        .unwrap_or(config.base.description.as_str());
    let image = seo.image.or(config.base.avatar.as_deref());

    html! {
        title { (title) }
        meta name="description" content=(description);
        meta property="og:title" content=(title);
        meta property="og:description" content=(description);
        meta property="og:type" content="website";
        @if let Some(image) = image {
            meta property="og:image" content=(image);
        }
        meta name="twitter:card" content="summary";
        meta name="twitter:creator" content=(config.base.author);
        meta name="twitter:title" content=(title);
        meta name="twitter:description" content=(description);
        @if !seo.keywords.is_empty() {
            meta name="keywords" content=(seo.keywords.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.title = "Phi Notes".into();
        config.base.description = "Tech and web development".into();
        config.base.author = "@phi".into();
        config
    }

    #[test]
    fn test_title_template() {
        let seo = Seo {
            title: "Hello",
            ..Seo::default()
        };
        let html = head(&seo, &config()).into_string();

        assert!(html.contains("<title>Hello | Phi Notes</title>"));
        assert!(html.contains(r#"<meta property="og:title" content="Hello | Phi Notes">"#));
        assert!(html.contains(r#"<meta name="twitter:title" content="Hello | Phi Notes">"#));
        assert!(html.contains(r#"<meta name="twitter:creator" content="@phi">"#));
        assert!(html.contains(r#"<meta property="og:type" content="website">"#));
    }

    #[test]
    fn test_description_falls_back_to_site() {
        let seo = Seo {
            title: "Hello",
            description: Some(""),
            ..Seo::default()
        };
        let html = head(&seo, &config()).into_string();
        assert!(html.contains(r#"<meta name="description" content="Tech and web development">"#));

        let seo = Seo {
            title: "Hello",
            description: Some("About hello"),
            ..Seo::default()
        };
        let html = head(&seo, &config()).into_string();
        assert!(html.contains(r#"<meta name="description" content="About hello">"#));
        assert!(html.contains(r#"<meta property="og:description" content="About hello">"#));
    }

    #[test]
    fn test_keywords_only_when_present() {
        let seo = Seo {
            title: "Hello",
            ..Seo::default()
        };
        assert!(!head(&seo, &config()).into_string().contains("keywords"));

        let tags = vec!["rust".to_string(), "blog".to_string()];
        let seo = Seo {
            title: "Hello",
            keywords: &tags,
            ..Seo::default()
        };
        let html = head(&seo, &config()).into_string();
        assert!(html.contains(r#"<meta name="keywords" content="rust, blog">"#));
    }

    #[test]
    fn test_image_falls_back_to_avatar() {
        let seo = Seo {
            title: "Hello",
            ..Seo::default()
        };
        assert!(!head(&seo, &config()).into_string().contains("og:image"));

        let mut config = config();
        config.base.avatar = Some("/avatar.jpg".into());
        let html = head(&seo, &config).into_string();
        assert!(html.contains(r#"<meta property="og:image" content="/avatar.jpg">"#));

        let seo = Seo {
            title: "Hello",
            image: Some("/a/cover.jpg"),
            ..Seo::default()
        };
        let html = head(&seo, &config).into_string();
        assert!(html.contains(r#"content="/a/cover.jpg""#));
    }
}
