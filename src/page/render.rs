//! HTML rendering of page metadata and documents.

use serde_json::Value;

use crate::seo::{PageMetadata, X_DEFAULT};
use crate::utils::html::{escape, escape_attr, escape_json_script};

/// `<head>` tags for a page: title, description, canonical and alternate
/// links, Open Graph and Twitter Card.
pub fn head_tags(meta: &PageMetadata) -> String {
    let mut html = String::with_capacity(2048);

    html.push_str("<title>");
    html.push_str(&escape(&meta.title));
    html.push_str("</title>\n");
    push_meta(&mut html, "name", "description", &meta.description);
    push_link(&mut html, "canonical", None, &meta.canonical);

    // x-default last, after the concrete locales
    let mut alternates: Vec<_> = meta
        .alternates
        .iter()
        .filter(|(lang, _)| lang.as_str() != X_DEFAULT)
        .collect();
    alternates.extend(meta.alternates.get_key_value(X_DEFAULT));
    for (lang, href) in alternates {
        push_link(&mut html, "alternate", Some(lang.as_str()), href);
    }

    let og = &meta.open_graph;
    push_meta(&mut html, "property", "og:type", og.og_type);
    push_meta(&mut html, "property", "og:title", &og.title);
    push_meta(&mut html, "property", "og:description", &og.description);
    push_meta(&mut html, "property", "og:url", &og.url);
    push_meta(&mut html, "property", "og:site_name", &og.site_name);
    push_meta(&mut html, "property", "og:locale", &og.locale);
    for image in &og.images {
        push_meta(&mut html, "property", "og:image", &image.url);
        if let Some(width) = image.width {
            push_meta(&mut html, "property", "og:image:width", &width.to_string());
        }
        if let Some(height) = image.height {
            push_meta(&mut html, "property", "og:image:height", &height.to_string());
        }
    }

    let twitter = &meta.twitter;
    push_meta(&mut html, "name", "twitter:card", twitter.card);
    push_meta(&mut html, "name", "twitter:title", &twitter.title);
    push_meta(&mut html, "name", "twitter:description", &twitter.description);
    for image in &twitter.images {
        push_meta(&mut html, "name", "twitter:image", image);
    }

    html
}

fn push_meta(html: &mut String, attr: &str, key: &str, content: &str) {
    html.push_str("<meta ");
    html.push_str(attr);
    html.push_str("=\"");
    html.push_str(key);
    html.push_str("\" content=\"");
    html.push_str(&escape_attr(content));
    html.push_str("\">\n");
}

fn push_link(html: &mut String, rel: &str, hreflang: Option<&str>, href: &str) {
    html.push_str("<link rel=\"");
    html.push_str(rel);
    if let Some(lang) = hreflang {
        html.push_str("\" hreflang=\"");
        html.push_str(&escape_attr(lang));
    }
    html.push_str("\" href=\"");
    html.push_str(&escape_attr(href));
    html.push_str("\">\n");
}

/// `<script type="application/ld+json">` element for structured data.
pub fn json_ld_script(data: &Value) -> String {
    let json = data.to_string();
    format!(
        "<script type=\"application/ld+json\">{}</script>\n",
        escape_json_script(&json)
    )
}

/// Full HTML document.
pub fn document(lang: &str, meta: &PageMetadata, structured: Option<&Value>, body: &str) -> String {
    let mut html = String::with_capacity(4096 + body.len());
    html.push_str("<!DOCTYPE html>\n<html lang=\"");
    html.push_str(&escape_attr(lang));
    html.push_str("\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&head_tags(meta));
    if let Some(data) = structured {
        html.push_str(&json_ld_script(data));
    }
    html.push_str("</head>\n<body>\n");
    html.push_str(body);
    html.push_str("</body>\n</html>\n");
    html
}
