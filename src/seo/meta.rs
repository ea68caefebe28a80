//! Page metadata: title, canonical/alternate links, Open Graph and Twitter Card.
//!
//! [`build_metadata`] is pure. Rendering into `<head>` tags lives in
//! `page::render`.

use std::collections::BTreeMap;

use serde::Serialize;

use super::links::{LinkBuilder, build_links};
use super::origin::Origin;
use crate::config::{SiteConfig, SiteImage};
use crate::core::url::with_leading_slash;

/// Image used when a page provides none.
pub const DEFAULT_OG_IMAGE: &str = "/og.png";
pub const DEFAULT_OG_WIDTH: u32 = 1200;
pub const DEFAULT_OG_HEIGHT: u32 = 630;

const OG_TYPE: &str = "website";
const TWITTER_CARD: &str = "summary_large_image";

/// Explicit inputs shared by every page rendered for one request.
#[derive(Debug, Clone, Copy)]
pub struct MetadataContext<'a> {
    pub locale: &'a str,
    pub config: &'a SiteConfig,
    pub origin: &'a Origin,
}

impl<'a> MetadataContext<'a> {
    pub const fn new(locale: &'a str, config: &'a SiteConfig, origin: &'a Origin) -> Self {
        Self {
            locale,
            config,
            origin,
        }
    }

    pub fn links(&self) -> LinkBuilder<'a> {
        LinkBuilder::new(
            self.origin,
            &self.config.i18n.locales,
            &self.config.i18n.default_locale,
        )
    }

    /// The configured `[site.image]`, if any.
    pub fn site_image(&self) -> Option<ImageRef> {
        self.config.site.image.as_ref().map(ImageRef::from)
    }
}

/// Page image, either a bare URL or one with known dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    Url(String),
    Sized {
        url: String,
        width: Option<u32>,
        height: Option<u32>,
    },
}

impl From<&str> for ImageRef {
    fn from(url: &str) -> Self {
        Self::Url(url.to_string())
    }
}

impl From<&SiteImage> for ImageRef {
    fn from(image: &SiteImage) -> Self {
        Self::Sized {
            url: image.url.clone(),
            width: image.width,
            height: image.height,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetadataInput {
    pub title: String,
    pub description: String,
    /// Logical path with optional query; defaults to `/`.
    pub path: Option<String>,
    pub image: Option<ImageRef>,
}

impl MetadataInput {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set or clear the page image.
    pub fn image(mut self, image: impl Into<Option<ImageRef>>) -> Self {
        self.image = image.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OgImage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenGraph {
    #[serde(rename = "type")]
    pub og_type: &'static str,
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    pub locale: String,
    pub images: Vec<OgImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TwitterCard {
    pub card: &'static str,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub canonical: String,
    /// Locale code (and `x-default`) -> absolute URL.
    pub alternates: BTreeMap<String, String>,
    pub site_name: String,
    pub locale: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
}

/// Assemble the metadata of one page.
pub fn build_metadata(ctx: &MetadataContext<'_>, input: MetadataInput) -> PageMetadata {
    let path = match input.path.as_deref() {
        None | Some("") => "/".to_string(),
        Some(p) => with_leading_slash(p),
    };
    let i18n = &ctx.config.i18n;
    let links = build_links(ctx.origin, &path, &i18n.locales, &i18n.default_locale, ctx.locale);

    let images = vec![resolve_image(ctx.origin, input.image)];
    let site_name = ctx.config.site.name.clone();

    PageMetadata {
        open_graph: OpenGraph {
            og_type: OG_TYPE,
            title: input.title.clone(),
            description: input.description.clone(),
            url: links.canonical.clone(),
            site_name: site_name.clone(),
            locale: ctx.locale.to_string(),
            images: images.clone(),
        },
        twitter: TwitterCard {
            card: TWITTER_CARD,
            title: input.title.clone(),
            description: input.description.clone(),
            images: images.into_iter().map(|img| img.url).collect(),
        },
        title: input.title,
        description: input.description,
        canonical: links.canonical,
        alternates: links.alternates,
        site_name,
        locale: ctx.locale.to_string(),
    }
}

fn resolve_image(origin: &Origin, image: Option<ImageRef>) -> OgImage {
    match image {
        Some(ImageRef::Url(url)) => OgImage {
            url: origin.join(&url),
            width: None,
            height: None,
        },
        Some(ImageRef::Sized { url, width, height }) => OgImage {
            url: origin.join(&url),
            width,
            height,
        },
        None => OgImage {
            url: origin.join(DEFAULT_OG_IMAGE),
            width: Some(DEFAULT_OG_WIDTH),
            height: Some(DEFAULT_OG_HEIGHT),
        },
    }
}
