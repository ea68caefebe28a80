//! Locale-prefixed paths.
//!
//! One rule everywhere: the default locale has no prefix, every other locale
//! is prefixed with `/{locale}`.
//!
//! ```text
//! localize("/prompts", "en", "en")   -> /prompts
//! localize("/prompts", "de", "en")   -> /de/prompts
//! localize("/", "de", "en")          -> /de
//! localize("/?page=2", "de", "en")   -> /de?page=2
//! localize("https://cdn/x", "de", _) -> https://cdn/x
//! ```

use super::url::{is_absolute_http, split_query};

/// Produce the locale-prefixed form of a logical path.
pub fn localize(path: &str, locale: &str, default_locale: &str) -> String {
    if is_absolute_http(path) || locale == default_locale {
        return path.to_string();
    }

    let (pathname, query) = split_query(path);
    let pathname = match pathname {
        "" | "/" => "",
        p => p.trim_start_matches('/'),
    };

    if pathname.is_empty() {
        format!("/{locale}{query}")
    } else {
        format!("/{locale}/{pathname}{query}")
    }
}

/// Remove a `/{locale}` prefix from a path.
///
/// Returns `None` when the first segment is not exactly `locale`.
pub fn strip_locale_prefix(path: &str, locale: &str) -> Option<String> {
    let (pathname, query) = split_query(path);
    let rest = pathname.strip_prefix('/')?.strip_prefix(locale)?;

    if rest.is_empty() {
        Some(format!("/{query}"))
    } else if rest.starts_with('/') {
        Some(format!("{rest}{query}"))
    } else {
        None
    }
}

/// Find the locale a request path targets and its logical (unprefixed) path.
///
/// Paths without a configured locale prefix belong to the default locale.
pub fn split_locale<'a>(
    path: &str,
    locales: &'a [String],
    default_locale: &'a str,
) -> (&'a str, String) {
    locales
        .iter()
        .find_map(|locale| strip_locale_prefix(path, locale).map(|rest| (locale.as_str(), rest)))
        .unwrap_or_else(|| (default_locale, path.to_string()))
}
