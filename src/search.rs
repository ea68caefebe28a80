//! Prompt search dispatch.
//!
//! Two implementations behind [`PromptSearch`]: [`KeywordSearch`] always
//! works, [`SemanticSearch`] needs the catalog's AI capability. The caller
//! picks one with an explicit flag; [`run_search`] falls back to keyword
//! search when semantic search fails or finds nothing.

use crate::catalog::{Catalog, CatalogError, PageRequest, Prompt, PromptFilter, PromptOrder};
use crate::{debug, log};

/// Prompts per listing page.
pub const PER_PAGE: usize = 12;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub filter: PromptFilter,
    pub order: PromptOrder,
    /// 1-based page number.
    pub page: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub prompts: Vec<Prompt>,
    /// Total number of matches across all pages.
    pub total: usize,
    /// Whether the results came from semantic search.
    pub semantic: bool,
}

#[allow(async_fn_in_trait)]
pub trait PromptSearch {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResults, CatalogError>;
}

/// Filtered, ordered, paged search over public prompts.
pub struct KeywordSearch<'a, C> {
    catalog: &'a C,
}

impl<'a, C: Catalog> KeywordSearch<'a, C> {
    pub const fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }
}

impl<C: Catalog> PromptSearch for KeywordSearch<'_, C> {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResults, CatalogError> {
        let page = PageRequest::page(request.page, PER_PAGE);
        let (prompts, total) = tokio::try_join!(
            self.catalog.find_prompts(&request.filter, request.order, page),
            self.catalog.count_prompts(&request.filter),
        )?;
        Ok(SearchResults {
            prompts,
            total,
            semantic: false,
        })
    }
}

/// Relevance-ranked search on the free-text query only.
///
/// Returns one page of results; the total is the result count and
/// contributor counts are not reported.
pub struct SemanticSearch<'a, C> {
    catalog: &'a C,
}

impl<'a, C: Catalog> SemanticSearch<'a, C> {
    pub const fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }
}

impl<C: Catalog> PromptSearch for SemanticSearch<'_, C> {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResults, CatalogError> {
        let query = request.filter.query.as_deref().unwrap_or_default();
        let mut prompts = self.catalog.semantic_search(query, PER_PAGE).await?;
        prompts.truncate(PER_PAGE);
        for prompt in &mut prompts {
            prompt.contributor_count = 0;
        }
        Ok(SearchResults {
            total: prompts.len(),
            prompts,
            semantic: true,
        })
    }
}

/// Whether a listing request should try semantic search first.
pub fn wants_semantic<C: Catalog>(catalog: &C, ai: bool, query: Option<&str>) -> bool {
    ai && query.is_some_and(|q| !q.trim().is_empty()) && catalog.semantic_search_enabled()
}

/// Run a listing search, semantic first when `use_semantic` is set.
pub async fn run_search<C: Catalog>(
    catalog: &C,
    request: &SearchRequest,
    use_semantic: bool,
) -> Result<SearchResults, CatalogError> {
    if use_semantic {
        match SemanticSearch::new(catalog).search(request).await {
            Ok(results) if !results.prompts.is_empty() => return Ok(results),
            Ok(_) => debug!("search"; "semantic search found nothing, using keyword search"),
            Err(err) => log!("search"; "semantic search failed, using keyword search: {err}"),
        }
    }
    KeywordSearch::new(catalog).search(request).await
}
