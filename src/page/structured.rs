//! JSON-LD structured data (schema.org).

use serde_json::{Map, Value, json};

use crate::catalog::Prompt;
use crate::seo::MetadataContext;

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// The site as a schema.org `Organization`.
pub fn organization(ctx: &MetadataContext<'_>) -> Value {
    let site = &ctx.config.site;
    json!({
        "@type": "Organization",
        "name": site.name,
        "url": ctx.origin.as_str(),
        "description": site.description,
        "logo": ctx.origin.join(site.logo_or_default()),
    })
}

/// Two-level breadcrumb: site root, then the current page.
pub fn breadcrumbs(ctx: &MetadataContext<'_>, name: &str, path: &str) -> Value {
    json!({
        "@type": "BreadcrumbList",
        "itemListElement": [
            {
                "@type": "ListItem",
                "position": 1,
                "name": ctx.config.site.name,
                "item": ctx.origin.as_str(),
            },
            {
                "@type": "ListItem",
                "position": 2,
                "name": name,
                "item": ctx.links().url(path, ctx.locale),
            },
        ],
    })
}

/// A prompt as a schema.org `CreativeWork`, with localized URLs.
pub fn creative_work(ctx: &MetadataContext<'_>, prompt: &Prompt) -> Value {
    let links = ctx.links();
    let author_name = prompt
        .author
        .display_name()
        .unwrap_or(prompt.author.username.as_str());

    let mut work = Map::new();
    work.insert("@type".into(), "CreativeWork".into());
    work.insert("name".into(), prompt.title.clone().into());
    if let Some(description) = &prompt.description {
        work.insert("description".into(), description.clone().into());
    }
    work.insert("url".into(), links.url(&prompt.path(), ctx.locale).into());
    work.insert(
        "author".into(),
        json!({
            "@type": "Person",
            "name": author_name,
            "url": links.url(&prompt.author.path(), ctx.locale),
        }),
    );
    work.insert("inLanguage".into(), ctx.locale.into());
    work.insert("datePublished".into(), prompt.created_at.to_rfc3339().into());
    work.insert("dateModified".into(), prompt.updated_at.to_rfc3339().into());
    Value::Object(work)
}

/// `@graph` of organization, breadcrumbs and one work per prompt.
pub fn listing_graph(
    ctx: &MetadataContext<'_>,
    page_name: &str,
    page_path: &str,
    prompts: &[Prompt],
) -> Value {
    let mut graph = vec![organization(ctx), breadcrumbs(ctx, page_name, page_path)];
    graph.extend(prompts.iter().map(|p| creative_work(ctx, p)));
    json!({
        "@context": SCHEMA_CONTEXT,
        "@graph": graph,
    })
}
