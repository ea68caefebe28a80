//! Listing page query parameters.
//!
//! `?q=review&type=TEXT&category=c1&tag=chatgpt&sort=upvotes&page=2&ai=1`

use url::form_urlencoded;

use crate::catalog::{PromptFilter, PromptOrder};
use crate::search::SearchRequest;

/// Highest page number a query may ask for; larger values are clamped.
pub const MAX_PAGE: usize = 10_000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingParams {
    pub q: Option<String>,
    /// Prompt type (`type` in the query string).
    pub kind: Option<String>,
    /// Category id.
    pub category: Option<String>,
    /// Tag slug.
    pub tag: Option<String>,
    pub sort: PromptOrder,
    /// 1-based page number.
    pub page: usize,
    /// `ai=1` requests semantic search.
    pub ai: bool,
}

impl ListingParams {
    /// Parse a query string, with or without its leading `?`.
    ///
    /// Empty values count as absent; an unknown `sort` or a malformed
    /// `page` falls back to the default, and a `page` above [`MAX_PAGE`] is
    /// clamped to it. Repeated keys keep the first value.
    pub fn parse(query: &str) -> Self {
        let mut params = Self {
            page: 1,
            ..Default::default()
        };
        let query = query.strip_prefix('?').unwrap_or(query);

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_ref() {
                "q" => &mut params.q,
                "type" => &mut params.kind,
                "category" => &mut params.category,
                "tag" => &mut params.tag,
                "sort" => {
                    if let Some(order) = PromptOrder::from_param(value) {
                        params.sort = order;
                    }
                    continue;
                }
                "page" => {
                    params.page = value
                        .parse::<usize>()
                        .ok()
                        .filter(|p| *p > 0)
                        .map_or(1, |p| p.min(MAX_PAGE));
                    continue;
                }
                "ai" => {
                    params.ai = value == "1";
                    continue;
                }
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }
        params
    }

    pub fn filter(&self) -> PromptFilter {
        PromptFilter {
            query: self.q.clone(),
            kind: self.kind.clone(),
            category_id: self.category.clone(),
            tag_slug: self.tag.clone(),
        }
    }

    pub fn to_request(&self) -> SearchRequest {
        SearchRequest {
            filter: self.filter(),
            order: self.sort,
            page: self.page,
        }
    }
}

/// Build `path?key=value&...`, form-encoding the values.
pub fn with_query(path: &str, pairs: &[(&str, &str)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("{path}?{query}")
}
