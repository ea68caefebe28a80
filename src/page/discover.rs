//! `/discover` page: the most upvoted prompts.

use crate::catalog::{Catalog, CatalogError, PageRequest, PromptFilter, PromptOrder};
use crate::core::localize;
use crate::page::{render, structured};
use crate::search::PER_PAGE;
use crate::seo::{MetadataContext, MetadataInput, build_metadata};
use crate::utils::html::{escape, escape_attr};

pub const PATH: &str = "/discover";

pub async fn discover_page<C: Catalog>(
    catalog: &C,
    ctx: &MetadataContext<'_>,
) -> Result<String, CatalogError> {
    let prompts = catalog
        .find_prompts(
            &PromptFilter::default(),
            PromptOrder::Upvotes,
            PageRequest::first(PER_PAGE),
        )
        .await?;

    let site_name = &ctx.config.site.name;
    let meta = build_metadata(
        ctx,
        MetadataInput::new(
            format!("Discover - {site_name}"),
            format!("Discover the most loved prompts on {site_name}."),
        )
        .path(PATH)
        .image(ctx.site_image()),
    );
    let graph = structured::listing_graph(ctx, "Discover", PATH, &prompts);

    let default_locale = &ctx.config.i18n.default_locale;
    let mut body = String::from("<main class=\"discover\">\n<h1>Discover</h1>\n<ol class=\"prompt-list\">\n");
    for prompt in &prompts {
        body.push_str(&format!(
            "<li><a href=\"{}\">{}</a><span class=\"votes\">{}</span></li>\n",
            escape_attr(&localize(&prompt.path(), ctx.locale, default_locale)),
            escape(&prompt.title),
            prompt.vote_count
        ));
    }
    body.push_str("</ol>\n</main>\n");

    Ok(render::document(ctx.locale, &meta, Some(&graph), &body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use crate::catalog::model::fixture;
    use crate::config::test_parse_config;
    use crate::seo::Origin;
    use crate::utils::date::DateTimeUtc;

    #[test]
    fn test_discover_orders_by_votes() {
        let mut popular = fixture::prompt("hot", DateTimeUtc::from_ymd(2024, 1, 1));
        popular.vote_count = 42;
        let fresh = fixture::prompt("new", DateTimeUtc::from_ymd(2024, 5, 1));
        let catalog = MemoryCatalog::from_parts(vec![fresh, popular], vec![], vec![], vec![]);

        let config = test_parse_config("");
        let origin = Origin::parse("https://prompts.example").unwrap();
        let ctx = MetadataContext::new("en", &config, &origin);
        let html = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(discover_page(&catalog, &ctx))
            .unwrap();

        assert!(html.contains("<title>Discover - Test</title>"));
        assert!(html.contains(r#"<link rel="canonical" href="https://prompts.example/discover">"#));
        let hot = html.find("/prompts/hot_slug-hot").unwrap();
        let new = html.find("/prompts/new_slug-new").unwrap();
        assert!(hot < new);
    }
}
