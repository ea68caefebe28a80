//! RSS 2.0 feed generation.
//!
//! Lists the newest public prompts, capped at [`MAX_FEED_ITEMS`]. Every text
//! field is XML-escaped, so the document stays well-formed for arbitrary
//! user-authored titles and descriptions.

use crate::catalog::{Catalog, CatalogError, PageRequest, Prompt, PromptFilter, PromptOrder};
use crate::config::SiteConfig;
use crate::generator::escape_xml;
use crate::seo::Origin;
use crate::utils::date::DateTimeUtc;

/// Maximum number of items in the feed.
pub const MAX_FEED_ITEMS: usize = 50;

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Feed path relative to the origin.
pub const FEED_PATH: &str = "/feed.xml";

/// One `<item>` of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub id: String,
    /// Absolute prompt URL, also used as GUID.
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub created_at: DateTimeUtc,
}

impl FeedItem {
    pub fn from_prompt(prompt: &Prompt, origin: &Origin) -> Self {
        Self {
            id: prompt.id.clone(),
            url: origin.join(&prompt.path()),
            title: prompt.title.clone(),
            description: prompt.summary().map(str::to_string),
            author: prompt.author.display_name().map(str::to_string),
            created_at: prompt.created_at,
        }
    }
}

struct RssFeed<'a> {
    title: &'a str,
    description: &'a str,
    link: String,
    language: &'a str,
    last_build: DateTimeUtc,
    self_link: String,
    items: Vec<FeedItem>,
}

impl RssFeed<'_> {
    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(1024 + self.items.len() * 512);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<rss version=\"2.0\" xmlns:atom=\"");
        xml.push_str(ATOM_NS);
        xml.push_str("\">\n<channel>\n");

        push_element(&mut xml, "title", self.title);
        push_element(&mut xml, "description", self.description);
        push_element(&mut xml, "link", &self.link);
        push_element(&mut xml, "language", self.language);
        push_element(&mut xml, "lastBuildDate", &self.last_build.to_rfc2822());
        xml.push_str("  <atom:link href=\"");
        xml.push_str(&escape_xml(&self.self_link));
        xml.push_str("\" rel=\"self\" type=\"application/rss+xml\"/>\n");

        for item in &self.items {
            xml.push_str("  <item>\n");
            push_element(&mut xml, "title", &item.title);
            push_element(&mut xml, "link", &item.url);
            push_element(&mut xml, "guid", &item.url);
            if let Some(description) = &item.description {
                push_element(&mut xml, "description", description);
            }
            if let Some(author) = &item.author {
                push_element(&mut xml, "author", author);
            }
            push_element(&mut xml, "pubDate", &item.created_at.to_rfc2822());
            xml.push_str("  </item>\n");
        }

        xml.push_str("</channel>\n</rss>\n");
        xml
    }
}

fn push_element(xml: &mut String, name: &str, text: &str) {
    xml.push_str("  <");
    xml.push_str(name);
    xml.push('>');
    xml.push_str(&escape_xml(text));
    xml.push_str("</");
    xml.push_str(name);
    xml.push_str(">\n");
}

/// Build the RSS document.
///
/// `now` is the `lastBuildDate` of an empty feed; otherwise the newest
/// prompt's update time is used.
pub async fn build_feed<C: Catalog>(
    catalog: &C,
    config: &SiteConfig,
    origin: &Origin,
    now: DateTimeUtc,
) -> Result<String, CatalogError> {
    let prompts = catalog
        .find_prompts(
            &PromptFilter::default(),
            PromptOrder::Newest,
            PageRequest::first(MAX_FEED_ITEMS),
        )
        .await?;

    let last_build = prompts.first().map_or(now, |p| p.updated_at);
    let items = prompts
        .iter()
        .take(MAX_FEED_ITEMS)
        .map(|p| FeedItem::from_prompt(p, origin))
        .collect();

    let feed = RssFeed {
        title: &config.site.name,
        description: &config.site.description,
        link: origin.join("/"),
        language: &config.i18n.default_locale,
        last_build,
        self_link: origin.join(FEED_PATH),
        items,
    };
    Ok(feed.into_xml())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use crate::catalog::model::fixture;
    use crate::config::test_parse_config;
    use crate::generator::assert_well_formed;

    fn origin() -> Origin {
        Origin::parse("https://prompts.example").unwrap()
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    fn feed_for(prompts: Vec<Prompt>) -> String {
        let catalog = MemoryCatalog::from_parts(prompts, vec![], vec![], vec![]);
        let config = test_parse_config("");
        let now = DateTimeUtc::new(2024, 6, 1, 12, 0, 0);
        block_on(build_feed(&catalog, &config, &origin(), now)).unwrap()
    }

    #[test]
    fn test_caps_at_newest_fifty() {
        // 75 prompts, one per day starting 2024-01-01
        let prompts = (0..75)
            .map(|i| {
                let created = DateTimeUtc::from_unix(1_704_067_200 + i * 86_400);
                fixture::prompt(&format!("p{i}"), created)
            })
            .collect();
        let xml = feed_for(prompts);
        assert_well_formed(&xml);

        let channel = rss::Channel::read_from(xml.as_bytes()).unwrap();
        assert_eq!(channel.items().len(), MAX_FEED_ITEMS);
        assert_eq!(
            channel.items()[0].link(),
            Some("https://prompts.example/prompts/p74_slug-p74")
        );
        assert_eq!(
            channel.items()[49].link(),
            Some("https://prompts.example/prompts/p25_slug-p25")
        );
        // lastBuildDate follows the newest prompt
        assert_eq!(
            channel.last_build_date(),
            Some(DateTimeUtc::from_unix(1_704_067_200 + 74 * 86_400).to_rfc2822().as_str())
        );
    }

    #[test]
    fn test_empty_catalog() {
        let xml = feed_for(vec![]);
        assert_well_formed(&xml);

        let channel = rss::Channel::read_from(xml.as_bytes()).unwrap();
        assert!(channel.items().is_empty());
        assert_eq!(channel.title(), "Test");
        assert_eq!(channel.link(), "https://prompts.example/");
        assert_eq!(channel.language(), Some("en"));
        assert_eq!(channel.last_build_date(), Some("Sat, 01 Jun 2024 12:00:00 GMT"));
        assert!(xml.contains(
            r#"<atom:link href="https://prompts.example/feed.xml" rel="self" type="application/rss+xml"/>"#
        ));
    }

    #[test]
    fn test_escapes_titles() {
        let mut prompt = fixture::prompt("p1", DateTimeUtc::from_ymd(2024, 1, 1));
        prompt.title = "Rock & Roll <Prompt> \"quoted\" it's".into();
        prompt.description = Some("a < b".into());
        let xml = feed_for(vec![prompt]);

        assert_well_formed(&xml);
        assert!(xml.contains(
            "<title>Rock &amp; Roll &lt;Prompt&gt; &quot;quoted&quot; it&apos;s</title>"
        ));

        let channel = rss::Channel::read_from(xml.as_bytes()).unwrap();
        let item = &channel.items()[0];
        assert_eq!(item.title(), Some("Rock & Roll <Prompt> \"quoted\" it's"));
        assert_eq!(item.description(), Some("a < b"));
    }

    #[test]
    fn test_item_fields() {
        let mut with_name = fixture::prompt("p1", DateTimeUtc::new(2024, 1, 15, 10, 30, 45));
        with_name.author.name = Some("Alice Doe".into());
        with_name.description = Some(String::new());

        let xml = feed_for(vec![with_name]);
        let channel = rss::Channel::read_from(xml.as_bytes()).unwrap();
        let item = &channel.items()[0];

        assert_eq!(item.guid().map(|g| g.value()), item.link());
        assert_eq!(item.author(), Some("Alice Doe"));
        assert_eq!(item.description(), None);
        assert_eq!(item.pub_date(), Some("Mon, 15 Jan 2024 10:30:45 GMT"));
    }

    #[test]
    fn test_author_falls_back_to_username() {
        let prompt = fixture::prompt("p1", DateTimeUtc::from_ymd(2024, 1, 1));
        let xml = feed_for(vec![prompt]);
        assert!(xml.contains("<author>alice</author>"));
    }
}
