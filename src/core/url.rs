//! Logical path helpers.
//!
//! A logical path is what a page is addressed by before localization:
//! always starts with `/`, may carry a query string (`/tags/chatgpt?page=2`).

/// Check for an absolute `http://` or `https://` URL (scheme is case-insensitive).
pub fn is_absolute_http(path: &str) -> bool {
    let has_prefix = |prefix: &str| {
        path.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };
    has_prefix("http://") || has_prefix("https://")
}

/// Split a path into pathname and query, the query keeping its leading `?`.
///
/// `/tags/a?page=2` -> (`/tags/a`, `?page=2`), `/` -> (`/`, ``)
pub fn split_query(path: &str) -> (&str, &str) {
    match path.find('?') {
        Some(idx) => (&path[..idx], &path[idx..]),
        None => (path, ""),
    }
}

/// Add a leading slash if missing. Empty input becomes `/`.
pub fn with_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Decode the path part of a request target, keeping the query as-is.
pub fn decode_request_path(target: &str) -> (String, String) {
    use percent_encoding::percent_decode_str;

    let (path, query) = split_query(target);
    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| path.to_string());
    (with_leading_slash(&decoded), query.to_string())
}
