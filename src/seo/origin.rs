//! Application origin resolution.
//!
//! Every absolute URL the crate emits is built from one [`Origin`], resolved
//! once per request:
//!
//! 1. an explicitly configured origin (`site.url`, `--site-url`, `PROMPTDECK_URL`)
//! 2. `x-forwarded-proto` + `x-forwarded-host` / `host` request headers
//! 3. `http://localhost:3000`
//!
//! Resolution never fails: an unusable candidate degrades to the next rule.

use std::fmt;
use std::sync::LazyLock;

use url::Url;

use crate::core::url::{is_absolute_http, with_leading_slash};

/// Origin used when neither configuration nor headers provide one.
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

static LOCAL: LazyLock<Origin> = LazyLock::new(|| Origin::parse(DEFAULT_ORIGIN).unwrap());

/// Scheme, host and optional base path, without trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    base: String,
}

impl Origin {
    /// Parse an `http(s)` URL with a host. Query and fragment are dropped.
    pub fn parse(input: &str) -> Option<Self> {
        let mut url = Url::parse(input.trim()).ok()?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return None;
        }
        url.set_query(None);
        url.set_fragment(None);

        let base = url.as_str().trim_end_matches('/').to_string();
        Some(Self { base })
    }

    /// The local development origin.
    pub fn local() -> Self {
        LOCAL.clone()
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Resolve a path against the origin.
    ///
    /// Absolute `http(s)` input is returned unchanged.
    pub fn join(&self, path: &str) -> String {
        if is_absolute_http(path) {
            return path.to_string();
        }
        format!("{}{}", self.base, with_leading_slash(path))
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

/// Request headers relevant to origin resolution.
#[derive(Debug, Clone, Default)]
pub struct RequestHeaders {
    pairs: Vec<(String, String)>,
}

impl RequestHeaders {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// First non-empty value of a header, matched case-insensitively.
    ///
    /// Forwarded headers may carry a comma-separated chain of proxies;
    /// only the first entry is the client-facing value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .and_then(|(_, v)| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

/// Resolve the application origin.
pub fn resolve_base_url(explicit: Option<&str>, headers: Option<&RequestHeaders>) -> Origin {
    if let Some(origin) = explicit.and_then(Origin::parse) {
        return origin;
    }

    headers
        .and_then(origin_from_headers)
        .unwrap_or_else(Origin::local)
}

fn origin_from_headers(headers: &RequestHeaders) -> Option<Origin> {
    let host = headers
        .get("x-forwarded-host")
        .or_else(|| headers.get("host"))?;

    let proto = match headers.get("x-forwarded-proto") {
        Some(p) if p.eq_ignore_ascii_case("http") => "http",
        _ => "https",
    };

    Origin::parse(&format!("{proto}://{host}"))
}
