//! Request routing.
//!
//! Machine-readable surfaces live at the site root only; HTML pages accept
//! a locale prefix (`/de/prompts`).

use crate::catalog::{Catalog, CatalogError};
use crate::config::SiteConfig;
use crate::core::split_locale;
use crate::core::url::decode_request_path;
use crate::generator::feed::build_feed;
use crate::generator::robots::build_robots;
use crate::generator::sitemap::{build_sitemap, render_sitemap};
use crate::page::{self, ListingParams, discover_page, prompts_page};
use crate::seo::{MetadataContext, Origin};
use crate::utils::date::DateTimeUtc;
use crate::utils::mime::types::{HTML, PLAIN, RSS, XML};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Sitemap,
    Feed,
    Robots,
    Prompts { locale: String, params: ListingParams },
    Discover { locale: String },
}

/// Rendered response body.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub content_type: &'static str,
    pub body: String,
}

impl Route {
    /// Match a raw request target. `None` means 404.
    pub fn resolve(target: &str, config: &SiteConfig) -> Option<Self> {
        let (path, query) = decode_request_path(target);
        let path = trim_trailing_slash(&path);

        match path {
            "/sitemap.xml" => return Some(Self::Sitemap),
            "/feed.xml" => return Some(Self::Feed),
            "/robots.txt" => return Some(Self::Robots),
            _ => {}
        }

        let (locale, logical) =
            split_locale(path, &config.i18n.locales, &config.i18n.default_locale);
        let locale = locale.to_string();
        match trim_trailing_slash(&logical) {
            page::prompts::PATH => Some(Self::Prompts {
                locale,
                params: ListingParams::parse(&query),
            }),
            page::discover::PATH => Some(Self::Discover { locale }),
            _ => None,
        }
    }

    /// Render the route against the catalog for one resolved origin.
    pub async fn render<C: Catalog>(
        &self,
        catalog: &C,
        config: &SiteConfig,
        origin: &Origin,
    ) -> Result<Rendered, CatalogError> {
        let (content_type, body) = match self {
            Self::Sitemap => {
                let entries = build_sitemap(catalog, config, origin).await?;
                (XML, render_sitemap(&entries))
            }
            Self::Feed => (
                RSS,
                build_feed(catalog, config, origin, DateTimeUtc::now()).await?,
            ),
            Self::Robots => (PLAIN, build_robots(origin)),
            Self::Prompts { locale, params } => {
                let ctx = MetadataContext::new(locale, config, origin);
                (HTML, prompts_page(catalog, &ctx, params).await?)
            }
            Self::Discover { locale } => {
                let ctx = MetadataContext::new(locale, config, origin);
                (HTML, discover_page(catalog, &ctx).await?)
            }
        };
        Ok(Rendered { content_type, body })
    }
}

fn trim_trailing_slash(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}
