//! `/prompts` listing page.

use crate::catalog::{Catalog, CatalogError, Category, Prompt, PromptOrder, Tag};
use crate::core::localize;
use crate::page::params::{ListingParams, with_query};
use crate::page::{render, structured};
use crate::search::{PER_PAGE, SearchResults, run_search, wants_semantic};
use crate::seo::{MetadataContext, MetadataInput, build_metadata};
use crate::utils::html::{escape, escape_attr};
use crate::utils::plural::plural_count;

pub const PATH: &str = "/prompts";
const NEW_PROMPT_PATH: &str = "/prompts/new";
const MCP_PATH: &str = "/api/mcp";

/// Render the listing for one request.
pub async fn prompts_page<C: Catalog>(
    catalog: &C,
    ctx: &MetadataContext<'_>,
    params: &ListingParams,
) -> Result<String, CatalogError> {
    let features = &ctx.config.features;
    let use_semantic = wants_semantic(catalog, params.ai, params.q.as_deref());
    let request = params.to_request();

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
    let (results, categories, tags) = tokio::try_join!(
        run_search(catalog, &request, use_semantic),
        categories,
        tags,
    )?;

    let site_name = &ctx.config.site.name;
    let meta = build_metadata(
        ctx,
        MetadataInput::new(
            format!("Prompts - {site_name}"),
            format!("Browse and search the prompts shared on {site_name}."),
        )
        .path(PATH)
        .image(ctx.site_image()),
    );
    let graph = structured::listing_graph(ctx, "Prompts", PATH, &results.prompts);
    let body = Listing {
        ctx,
        params,
        results: &results,
        categories: &categories,
        tags: &tags,
    }
    .render();

    Ok(render::document(ctx.locale, &meta, Some(&graph), &body))
}

struct Listing<'a> {
    ctx: &'a MetadataContext<'a>,
    params: &'a ListingParams,
    results: &'a SearchResults,
    categories: &'a [Category],
    tags: &'a [Tag],
}

impl Listing<'_> {
    fn href(&self, path: &str) -> String {
        localize(path, self.ctx.locale, &self.ctx.config.i18n.default_locale)
    }

    fn render(&self) -> String {
        let mut html = String::with_capacity(8192);
        html.push_str("<main class=\"prompts\">\n<header>\n<h1>Prompts</h1>\n");
        html.push_str(&format!(
            "<span class=\"count\">{} found</span>\n",
            plural_count(self.results.total, "prompt")
        ));
        self.push_actions(&mut html);
        html.push_str("</header>\n");
        self.push_filters(&mut html);
        self.push_list(&mut html);
        self.push_pagination(&mut html);
        html.push_str("</main>\n");
        html
    }

    fn push_actions(&self, html: &mut String) {
        let config = self.ctx.config;
        html.push_str("<nav class=\"actions\">\n");
        if !config.homepage.use_clone_branding {
            html.push_str("<div class=\"integrations\">\n<span class=\"data-studio\">Data Studio</span>\n");
            if config.features.mcp {
                html.push_str(&format!(
                    "<a class=\"mcp\" href=\"{}\">MCP Server</a>\n",
                    escape_attr(MCP_PATH)
                ));
            }
            html.push_str("</div>\n");
        }
        html.push_str(&format!(
            "<a class=\"create\" href=\"{}\">Create prompt</a>\n</nav>\n",
            escape_attr(&self.href(NEW_PROMPT_PATH))
        ));
    }

    fn push_filters(&self, html: &mut String) {
        if self.categories.is_empty() && self.tags.is_empty() {
            return;
        }
        html.push_str("<aside class=\"filters\">\n");
        if !self.categories.is_empty() {
            html.push_str("<ul class=\"categories\">\n");
            for category in self.categories {
                let selected = self.params.category.as_deref() == Some(category.id.as_str());
                let href = with_query(&self.href(PATH), &[("category", category.id.as_str())]);
                push_filter_item(html, &href, &category.name, selected);
            }
            html.push_str("</ul>\n");
        }
        if !self.tags.is_empty() {
            html.push_str("<ul class=\"tags\">\n");
            for tag in self.tags {
                let selected = self.params.tag.as_deref() == Some(tag.slug.as_str());
                let href = with_query(&self.href(PATH), &[("tag", tag.slug.as_str())]);
                push_filter_item(html, &href, &tag.name, selected);
            }
            html.push_str("</ul>\n");
        }
        html.push_str("</aside>\n");
    }

    fn push_list(&self, html: &mut String) {
        if self.results.prompts.is_empty() {
            html.push_str("<p class=\"empty\">No prompts found.</p>\n");
            return;
        }
        html.push_str("<ol class=\"prompt-list\">\n");
        for prompt in &self.results.prompts {
            self.push_prompt(html, prompt);
        }
        html.push_str("</ol>\n");
    }

    fn push_prompt(&self, html: &mut String, prompt: &Prompt) {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a>",
            escape_attr(&self.href(&prompt.path())),
            escape(&prompt.title)
        ));
        if let Some(summary) = prompt.summary() {
            html.push_str(&format!("<p>{}</p>", escape(summary)));
        }
        if let Some(author) = prompt.author.display_name() {
            html.push_str(&format!(
                "<a class=\"author\" href=\"{}\">{}</a>",
                escape_attr(&self.href(&prompt.author.path())),
                escape(author)
            ));
        }
        html.push_str(&format!(
            "<span class=\"votes\">{}</span></li>\n",
            prompt.vote_count
        ));
    }

    fn push_pagination(&self, html: &mut String) {
        if self.results.semantic
            || self.params.page.saturating_mul(PER_PAGE) >= self.results.total
        {
            return;
        }
        let next = self.params.page.saturating_add(1).to_string();
        let mut pairs: Vec<(&str, &str)> = Vec::new();
        if let Some(q) = &self.params.q {
            pairs.push(("q", q.as_str()));
        }
        if let Some(kind) = &self.params.kind {
            pairs.push(("type", kind.as_str()));
        }
        if let Some(category) = &self.params.category {
            pairs.push(("category", category.as_str()));
        }
        if let Some(tag) = &self.params.tag {
            pairs.push(("tag", tag.as_str()));
        }
        if self.params.sort != PromptOrder::default() {
            pairs.push(("sort", self.params.sort.as_param()));
        }
        pairs.push(("page", next.as_str()));
        html.push_str(&format!(
            "<a class=\"next\" rel=\"next\" href=\"{}\">Next</a>\n",
            escape_attr(&with_query(&self.href(PATH), &pairs))
        ));
    }
}

fn push_filter_item(html: &mut String, href: &str, label: &str, selected: bool) {
    let class = if selected { " class=\"selected\"" } else { "" };
    html.push_str(&format!(
        "<li{class}><a href=\"{}\">{}</a></li>\n",
        escape_attr(href),
        escape(label)
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use crate::catalog::model::fixture;
    use crate::config::{SiteConfig, test_parse_config};
    use crate::seo::Origin;
    use crate::utils::date::DateTimeUtc;

    fn config(extra: &str) -> SiteConfig {
        let mut config = test_parse_config(&format!(
            "[i18n]\nlocales = [\"en\", \"de\"]\ndefault_locale = \"en\"\n{extra}"
        ));
        config.site.name = "Prompts Hub".into();
        config
    }

    fn catalog(count: i64) -> MemoryCatalog {
        let prompts = (0..count)
            .map(|i| fixture::prompt(&format!("p{i}"), DateTimeUtc::from_unix(i * 60)))
            .collect();
        MemoryCatalog::from_parts(
            prompts,
            vec![Category {
                id: "c1".into(),
                name: "Coding & Dev".into(),
                slug: "coding".into(),
                parent_id: None,
                order: 0,
            }],
            vec![Tag {
                id: "t1".into(),
                name: "ChatGPT".into(),
                slug: "chatgpt".into(),
            }],
            vec![],
        )
    }

    fn render(catalog: &MemoryCatalog, config: &SiteConfig, locale: &str, query: &str) -> String {
        let origin = Origin::parse("https://prompts.example").unwrap();
        let ctx = MetadataContext::new(locale, config, &origin);
        let params = ListingParams::parse(query);
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(prompts_page(catalog, &ctx, &params))
            .unwrap()
    }

    #[test]
    fn test_listing_page() {
        let html = render(&catalog(20), &config(""), "de", "");

        assert!(html.contains("<title>Prompts - Prompts Hub</title>"));
        assert!(html.contains(r#"<link rel="canonical" href="https://prompts.example/de/prompts">"#));
        assert!(html.contains("<span class=\"count\">20 prompts found</span>"));
        assert_eq!(html.matches("<li><a href=\"/de/prompts/").count(), PER_PAGE);
        assert!(html.contains(r#"<a class="create" href="/de/prompts/new">"#));
        assert!(html.contains(r#"<a class="mcp""#));
        assert!(html.contains("Coding &amp; Dev"));
        assert!(html.contains(r#"href="/de/prompts?tag=chatgpt""#));
        assert!(html.contains(r#"href="/de/prompts?page=2""#));
        assert!(html.contains("\"@type\":\"CreativeWork\""));
    }

    #[test]
    fn test_last_page_has_no_next() {
        let html = render(&catalog(20), &config(""), "en", "page=2");
        assert_eq!(html.matches("<li><a href=\"/prompts/").count(), 8);
        assert!(!html.contains("rel=\"next\""));
    }

    #[test]
    fn test_next_keeps_sort_and_filters() {
        let html = render(&catalog(20), &config(""), "en", "sort=upvotes&type=TEXT");
        assert!(html.contains(r#"href="/prompts?type=TEXT&amp;sort=upvotes&amp;page=2""#));

        let html = render(&catalog(20), &config(""), "en", "sort=newest");
        assert!(html.contains(r#"href="/prompts?page=2""#));
    }

    #[test]
    fn test_site_image_in_head() {
        let html = render(&catalog(1), &config(""), "en", "");
        assert!(html.contains(r#"<meta property="og:image" content="https://prompts.example/og.png">"#));

        let config = config("[site.image]\nurl = \"/social.png\"\nwidth = 1000\nheight = 500");
        let html = render(&catalog(1), &config, "en", "");
        assert!(html.contains(r#"<meta property="og:image" content="https://prompts.example/social.png">"#));
        assert!(html.contains(r#"<meta property="og:image:width" content="1000">"#));
        assert!(html.contains(r#"<meta name="twitter:image" content="https://prompts.example/social.png">"#));
    }

    #[test]
    fn test_huge_page_renders_empty() {
        let html = render(&catalog(20), &config(""), "en", "page=9223372036854775807");
        assert!(html.contains("No prompts found."));
        assert!(!html.contains("rel=\"next\""));
    }

    #[test]
    fn test_clone_branding_hides_integrations() {
        let config = config("[homepage]\nuse_clone_branding = true");
        let html = render(&catalog(1), &config, "en", "");
        assert!(!html.contains("data-studio"));
        assert!(!html.contains("class=\"mcp\""));

        let config = self::config("[features]\nmcp = false");
        let html = render(&catalog(1), &config, "en", "");
        assert!(html.contains("data-studio"));
        assert!(!html.contains("class=\"mcp\""));
    }

    #[test]
    fn test_filters_and_selection() {
        let html = render(&catalog(3), &config(""), "en", "tag=chatgpt");
        // fixture prompts carry no tags
        assert!(html.contains("<span class=\"count\">0 prompts found</span>"));
        assert!(html.contains("No prompts found."));
        assert!(html.contains(r#"<li class="selected"><a href="/prompts?tag=chatgpt">"#));
    }

    #[test]
    fn test_taxonomy_filters_follow_flags() {
        let config = config("[features]\ncategories = false\ntags = false");
        let html = render(&catalog(1), &config, "en", "");
        assert!(!html.contains("class=\"filters\""));
    }
}
