//! Sitemap generation.
//!
//! Lists every indexable page with its alternate-language URLs.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
//!         xmlns:xhtml="http://www.w3.org/1999/xhtml">
//!   <url>
//!     <loc>https://example.com/prompts</loc>
//!     <lastmod>2025-01-01T00:00:00Z</lastmod>
//!     <xhtml:link rel="alternate" hreflang="de" href="https://example.com/de/prompts"/>
//!   </url>
//! </urlset>
//! ```
//!
//! Entry order: static routes, prompts, categories, tags, users.

use std::collections::BTreeMap;

use crate::catalog::{Catalog, CatalogError, PageRequest, PromptFilter, PromptOrder};
use crate::config::{FeaturesConfig, SiteConfig};
use crate::generator::escape_xml;
use crate::seo::{LinkBuilder, Origin};
use crate::utils::date::DateTimeUtc;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// One `<url>` of the sitemap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    /// Canonical URL, in the default locale.
    pub url: String,
    pub last_modified: Option<DateTimeUtc>,
    /// Locale code (and `x-default`) -> absolute URL.
    pub alternates: BTreeMap<String, String>,
}

/// Fixed top-level routes, taxonomy indexes gated by their feature flags.
pub fn static_routes(features: &FeaturesConfig) -> Vec<&'static str> {
    let mut routes = vec!["/", "/prompts"];
    if features.categories {
        routes.push("/categories");
    }
    if features.tags {
        routes.push("/tags");
    }
    routes.extend(["/discover", "/promptmasters", "/brand", "/privacy", "/terms"]);
    routes
}

/// Collect sitemap entries.
///
/// Prompts, categories, tags and users are fetched concurrently; a failed
/// read fails the whole sitemap.
pub async fn build_sitemap<C: Catalog>(
    catalog: &C,
    config: &SiteConfig,
    origin: &Origin,
) -> Result<Vec<SitemapEntry>, CatalogError> {
    let features = &config.features;
    let public = PromptFilter::default();

    let categories = async {
        if features.categories {
            catalog.list_categories().await
        } else {
            Ok(Vec::new())
        }
    };
    let tags = async {
        if features.tags {
            catalog.list_tags().await
        } else {
            Ok(Vec::new())
        }
    };

    let (prompts, categories, tags, users) = tokio::try_join!(
        catalog.find_prompts(&public, PromptOrder::Newest, PageRequest::all()),
        categories,
        tags,
        catalog.list_public_authors(),
    )?;

    let default_locale = config.i18n.default_locale.as_str();
    let links = LinkBuilder::new(origin, &config.i18n.locales, default_locale);
    let entry = |path: &str, last_modified: Option<DateTimeUtc>| {
        let localized = links.links(path, default_locale);
        SitemapEntry {
            url: localized.canonical,
            last_modified,
            alternates: localized.alternates,
        }
    };

    let mut entries: Vec<SitemapEntry> = static_routes(features)
        .into_iter()
        .map(|route| entry(route, None))
        .collect();
    entries.extend(prompts.iter().map(|p| entry(&p.path(), Some(p.updated_at))));
    entries.extend(categories.iter().map(|c| entry(&c.path(), None)));
    entries.extend(tags.iter().map(|t| entry(&t.path(), None)));
    entries.extend(
        users
            .iter()
            .map(|u| entry(&u.path(), Some(u.updated_at))),
    );

    Ok(entries)
}

/// Serialize entries as a sitemap document.
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(256 + entries.len() * 512);

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push_str("\" xmlns:xhtml=\"");
    xml.push_str(XHTML_NS);
    xml.push_str("\">\n");

    for entry in entries {
        xml.push_str("  <url>\n    <loc>");
        xml.push_str(&escape_xml(&entry.url));
        xml.push_str("</loc>\n");
        if let Some(lastmod) = entry.last_modified {
            xml.push_str("    <lastmod>");
            xml.push_str(&lastmod.to_rfc3339());
            xml.push_str("</lastmod>\n");
        }
        for (hreflang, href) in &entry.alternates {
            xml.push_str("    <xhtml:link rel=\"alternate\" hreflang=\"");
            xml.push_str(&escape_xml(hreflang));
            xml.push_str("\" href=\"");
            xml.push_str(&escape_xml(href));
            xml.push_str("\"/>\n");
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use crate::catalog::model::fixture;
    use crate::catalog::{Category, Tag};
    use crate::config::test_parse_config;
    use crate::generator::assert_well_formed;

    fn config(extra: &str) -> SiteConfig {
        test_parse_config(&format!(
            "[i18n]\nlocales = [\"en\", \"de\"]\ndefault_locale = \"en\"\n{extra}"
        ))
    }

    fn origin() -> Origin {
        Origin::parse("https://prompts.example").unwrap()
    }

    fn catalog() -> MemoryCatalog {
        let mut hidden = fixture::prompt("p3", DateTimeUtc::from_ymd(2024, 3, 1));
        hidden.is_private = true;
        MemoryCatalog::from_parts(
            vec![
                fixture::prompt("p1", DateTimeUtc::from_ymd(2024, 1, 1)),
                fixture::prompt("p2", DateTimeUtc::from_ymd(2024, 2, 1)),
                hidden,
            ],
            vec![Category {
                id: "c1".into(),
                name: "Coding".into(),
                slug: "coding".into(),
                parent_id: None,
                order: 0,
            }],
            vec![Tag {
                id: "t1".into(),
                name: "ChatGPT".into(),
                slug: "chatgpt".into(),
            }],
            vec![fixture::user("u1", "alice"), fixture::user("u9", "lurker")],
        )
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    fn urls(entries: &[SitemapEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.url.as_str()).collect()
    }

    #[test]
    fn test_static_routes() {
        let all = static_routes(&FeaturesConfig::default());
        assert_eq!(all.len(), 9);
        assert_eq!(all[2], "/categories");

        let features = FeaturesConfig {
            categories: false,
            tags: false,
            ..Default::default()
        };
        let routes = static_routes(&features);
        assert!(!routes.contains(&"/categories"));
        assert!(!routes.contains(&"/tags"));
        assert_eq!(routes.len(), 7);
    }

    #[test]
    fn test_entry_order_and_content() {
        let entries = block_on(build_sitemap(&catalog(), &config(""), &origin())).unwrap();

        assert_eq!(
            &urls(&entries)[9..],
            [
                "https://prompts.example/prompts/p2_slug-p2",
                "https://prompts.example/prompts/p1_slug-p1",
                "https://prompts.example/categories/coding",
                "https://prompts.example/tags/chatgpt",
                "https://prompts.example/@alice",
            ]
        );
        assert_eq!(entries[0].url, "https://prompts.example/");
        assert_eq!(entries[0].last_modified, None);
        assert_eq!(entries[9].last_modified, Some(DateTimeUtc::from_ymd(2024, 2, 1)));

        for entry in &entries {
            assert_eq!(entry.alternates.len(), 3);
            assert_eq!(entry.alternates["en"], entry.url);
            assert!(entry.alternates.values().all(|u| u.starts_with("https://prompts.example/")));
        }
        assert_eq!(entries[1].alternates["de"], "https://prompts.example/de/prompts");
    }

    #[test]
    fn test_taxonomies_gated_by_flags() {
        let config = config("[features]\ncategories = false\ntags = false");
        let entries = block_on(build_sitemap(&catalog(), &config, &origin())).unwrap();
        let urls = urls(&entries);
        assert!(!urls.iter().any(|u| u.contains("/categories")));
        assert!(!urls.iter().any(|u| u.contains("/tags")));
        assert_eq!(entries.len(), 7 + 2 + 1);
    }

    #[test]
    fn test_render() {
        let entries = block_on(build_sitemap(&catalog(), &config(""), &origin())).unwrap();
        let xml = render_sitemap(&entries);

        assert_well_formed(&xml);
        assert!(xml.contains(&format!(r#"xmlns:xhtml="{XHTML_NS}""#)));
        assert!(xml.contains("<loc>https://prompts.example/prompts</loc>"));
        assert!(xml.contains("<lastmod>2024-02-01T00:00:00Z</lastmod>"));
        assert!(xml.contains(
            r#"<xhtml:link rel="alternate" hreflang="x-default" href="https://prompts.example/prompts"/>"#
        ));
        assert_eq!(xml.matches("<url>").count(), entries.len());
    }

    #[test]
    fn test_render_escapes() {
        let entries = vec![SitemapEntry {
            url: "https://prompts.example/tags/a?x=1&y=2".into(),
            last_modified: None,
            alternates: BTreeMap::from([(
                "en".to_string(),
                "https://prompts.example/tags/a?x=1&y=2".to_string(),
            )]),
        }];
        let xml = render_sitemap(&entries);
        assert_well_formed(&xml);
        assert!(xml.contains("<loc>https://prompts.example/tags/a?x=1&amp;y=2</loc>"));
        assert!(!xml.contains("x=1&y"));
    }

    #[test]
    fn test_render_empty() {
        let xml = render_sitemap(&[]);
        assert_well_formed(&xml);
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}""#)));
        assert!(!xml.contains("<url>"));
    }
}
