//! Canonical and alternate-language links.
//!
//! For a logical path, every configured locale gets one absolute alternate
//! URL, plus an `x-default` entry pointing at the unprefixed path.

use std::collections::BTreeMap;

use serde::Serialize;

use super::origin::Origin;
use crate::core::localize;

/// hreflang value of the locale-neutral fallback alternate.
pub const X_DEFAULT: &str = "x-default";

/// Canonical URL plus alternates keyed by locale code (and `x-default`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedLinks {
    pub canonical: String,
    pub alternates: BTreeMap<String, String>,
}

/// Link builder bound to one origin and locale set.
#[derive(Debug, Clone, Copy)]
pub struct LinkBuilder<'a> {
    origin: &'a Origin,
    locales: &'a [String],
    default_locale: &'a str,
}

impl<'a> LinkBuilder<'a> {
    pub const fn new(origin: &'a Origin, locales: &'a [String], default_locale: &'a str) -> Self {
        Self {
            origin,
            locales,
            default_locale,
        }
    }

    /// Absolute URL of `path` in `locale`.
    pub fn url(&self, path: &str, locale: &str) -> String {
        self.origin
            .join(&localize(path, locale, self.default_locale))
    }

    /// Links for `path` as seen from `active_locale`.
    ///
    /// The canonical URL is the active locale's alternate, or the unprefixed
    /// URL when `active_locale` is not configured.
    pub fn links(&self, path: &str, active_locale: &str) -> LocalizedLinks {
        let unprefixed = self.origin.join(path);

        let mut alternates: BTreeMap<String, String> = self
            .locales
            .iter()
            .map(|locale| (locale.clone(), self.url(path, locale)))
            .collect();

        let canonical = alternates
            .get(active_locale)
            .cloned()
            .unwrap_or_else(|| unprefixed.clone());

        alternates.insert(X_DEFAULT.to_string(), unprefixed);

        LocalizedLinks {
            canonical,
            alternates,
        }
    }
}

/// Build canonical and alternate links for a logical path.
pub fn build_links(
    origin: &Origin,
    path: &str,
    locales: &[String],
    default_locale: &str,
    active_locale: &str,
) -> LocalizedLinks {
    LinkBuilder::new(origin, locales, default_locale).links(path, active_locale)
}
