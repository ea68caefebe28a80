//! `[site]` section configuration.
//!
//! Branding and the explicit application origin.
//!
//! # Example
//!
//! ```toml
//! [site]
//! name = "Prompts"
//! description = "A library of community prompts"
//! logo = "/logo.svg"
//! url = "https://prompts.example"   # optional, otherwise derived per request
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Logo used in structured data when `logo` is not configured.
pub const DEFAULT_LOGO: &str = "/logo.svg";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site name, used as feed title, `og:site_name` and organization name.
    pub name: String,

    /// Site description.
    pub description: String,

    /// Logo path or absolute URL.
    pub logo: Option<String>,

    /// Explicit application origin (e.g., "https://prompts.example").
    /// When set, request headers are never consulted.
    pub url: Option<String>,

    /// Social preview image for listing pages.
    pub image: Option<SiteImage>,
}

/// `[site.image]`: path or absolute URL, with optional dimensions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteImage {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl SiteInfoConfig {
    const NAME: FieldPath = FieldPath::new("site.name");
    const URL: FieldPath = FieldPath::new("site.url");
    const IMAGE_URL: FieldPath = FieldPath::new("site.image.url");

    /// Logo path, falling back to [`DEFAULT_LOGO`].
    pub fn logo_or_default(&self) -> &str {
        self.logo
            .as_deref()
            .filter(|logo| !logo.is_empty())
            .unwrap_or(DEFAULT_LOGO)
    }

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `name` is not empty
    /// - `url` is a valid http(s) URL with a host
    /// - `image.url` is not empty when `[site.image]` is present
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.name.trim().is_empty() {
            diag.error_with_hint(Self::NAME, "site name is empty", "set name = \"My Prompts\"");
        }

        if let Some(image) = &self.image
            && image.url.trim().is_empty()
        {
            diag.error_with_hint(Self::IMAGE_URL, "image url is empty", "set url = \"/og.png\"");
        }

        if let Some(url_str) = &self.url {
            match url::Url::parse(url_str) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            Self::URL,
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            Self::URL,
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        Self::URL,
                        format!("invalid URL: {e}"),
                        "use format like https://example.com",
                    );
                }
            }
        }
    }
}
