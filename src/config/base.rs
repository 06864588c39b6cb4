//! `[base]` section configuration.
//!
//! Site-wide metadata shared by every page: title, description and author
//! feed the SEO tags, avatar and nav feed the header.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in folio.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "My Blog"
/// description = "Notes on tech and web development"
/// author = "@alice"
/// url = "https://myblog.com"
/// avatar = "/avatar.jpg"
///
/// [[base.nav]]
/// label = "Blog"
/// url = "/blog"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title, appended to every page title.
    pub title: String,

    /// Site description, used when a page has none of its own.
    pub description: String,

    /// Author handle for `twitter:creator` and the feed.
    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// Base URL for absolute links in the feed.
    /// Required when `[build.rss].enable = true`.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// Value of `<html lang>`.
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Avatar image shown in the header and used as fallback `og:image`.
    #[serde(default)]
    pub avatar: Option<String>,

    /// Favicon linked from every page.
    #[serde(default)]
    pub favicon: Option<String>,

    /// Header navigation links, in display order.
    #[serde(default = "defaults::base::nav")]
    #[educe(Default = defaults::base::nav())]
    pub nav: Vec<NavLink>,
}

/// One header navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub label: String,
    pub url: String,
}

impl NavLink {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use super::*;

    #[test]
    fn test_base_config_full() {
        let config = r#"
            [base]
            title = "Phi's Blog"
            description = "Tech and web development"
            author = "@phi"
            url = "https://phi.dev"
            language = "en-US"
            avatar = "/avatar.jpg"
            favicon = "/favicon.png"

            [[base.nav]]
            label = "Posts"
            url = "/posts"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "Phi's Blog");
        assert_eq!(config.base.description, "Tech and web development");
        assert_eq!(config.base.author, "@phi");
        assert_eq!(config.base.url, Some("https://phi.dev".to_string()));
        assert_eq!(config.base.language, "en-US");
        assert_eq!(config.base.avatar.as_deref(), Some("/avatar.jpg"));
        assert_eq!(config.base.favicon.as_deref(), Some("/favicon.png"));
        assert_eq!(config.base.nav, vec![NavLink::new("Posts", "/posts")]);
    }

    #[test]
    fn test_base_config_defaults() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test blog"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.author, "<YOUR_NAME>");
        assert_eq!(config.base.language, "en");
        assert_eq!(config.base.url, None);
        assert_eq!(config.base.avatar, None);
        assert_eq!(
            config.base.nav,
            vec![NavLink::new("Blog", "/blog"), NavLink::new("About Me", "/me")]
        );
    }

    #[test]
    fn test_empty_nav() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test blog"
            nav = []
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        assert!(config.base.nav.is_empty());
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test blog"
            unknown_field = "should_fail"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn test_base_config_unicode() {
        let config = r#"
            [base]
            title = "My Blog 🚀"
            description = "Ghi chép"
            author = "Hồng Phi"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "My Blog 🚀");
        assert_eq!(config.base.author, "Hồng Phi");
    }
}
