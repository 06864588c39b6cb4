//! Page shell: document head, site header and main column.

use crate::config::SiteConfig;
use maud::{DOCTYPE, Markup, html};

/// Wrap page content in the full HTML document.
pub fn page(config: &SiteConfig, head: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(config.base.language) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="generator" content=(concat!("folio v", env!("CARGO_PKG_VERSION")));
                (head)
                @if let Some(favicon) = &config.base.favicon {
                    link rel="shortcut icon" type="image/png" href=(favicon);
                }
            }
            body {
                (header(config))
                div class="body" {
                    main { (content) }
                }
            }
        }
    }
}

/// Avatar, site title linking home, then the nav links.
pub fn header(config: &SiteConfig) -> Markup {
    html! {
        header class="site-header" {
            div class="header-content" {
                @if let Some(avatar) = &config.base.avatar {
                    a class="avatar" href="/" {
                        img src=(avatar) alt=(config.base.author);
                    }
                }
                a class="site-title" href="/" { (config.base.title) }
                nav {
                    @for link in &config.base.nav {
                        a href=(link.url) { (link.label) }
                    }
                }
            }
        }
    }
}
