//! Snapshot-backed catalog.
//!
//! Loads a JSON document once at startup:
//!
//! ```json
//! {
//!   "users":      [{ "id": "u1", "username": "alice", "updated_at": "2024-01-01T00:00:00Z" }],
//!   "categories": [{ "id": "c1", "name": "Coding", "slug": "coding", "order": 0 }],
//!   "tags":       [{ "id": "t1", "name": "ChatGPT", "slug": "chatgpt" }],
//!   "prompts":    [{ "id": "p1", "slug": "review", "title": "Code review",
//!                    "author_id": "u1", "category_id": "c1", "tags": ["chatgpt"],
//!                    "created_at": "2024-01-15T10:30:45Z" }]
//! }
//! ```
//!
//! Prompts reference their author and category by id and their tags by slug.
//! Dangling references fail the load.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::model::{Author, Category, CategoryRef, Prompt, Tag, User};
use super::{Catalog, CatalogError, PageRequest, PromptFilter, PromptOrder};
use crate::utils::date::DateTimeUtc;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Snapshot {
    prompts: Vec<PromptRecord>,
    categories: Vec<Category>,
    tags: Vec<Tag>,
    users: Vec<User>,
}

#[derive(Debug, Deserialize)]
struct PromptRecord {
    id: String,
    #[serde(default)]
    slug: Option<String>,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    content: String,
    #[serde(rename = "type", default = "default_kind")]
    kind: String,
    #[serde(default)]
    category_id: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    author_id: String,
    #[serde(default)]
    contributor_ids: Vec<String>,
    #[serde(default)]
    vote_count: u32,
    #[serde(default)]
    is_private: bool,
    #[serde(default)]
    is_unlisted: bool,
    #[serde(default)]
    deleted_at: Option<DateTimeUtc>,
    created_at: DateTimeUtc,
    #[serde(default)]
    updated_at: Option<DateTimeUtc>,
}

fn default_kind() -> String {
    "TEXT".into()
}

/// In-memory catalog over a loaded snapshot.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    prompts: Vec<Prompt>,
    categories: Vec<Category>,
    tags: Vec<Tag>,
    users: Vec<User>,
    semantic: bool,
}

impl MemoryCatalog {
    /// Load a snapshot file.
    pub fn load(path: &Path, semantic: bool) -> Result<Self, CatalogError> {
        let content =
            fs::read_to_string(path).map_err(|err| CatalogError::Io(path.to_path_buf(), err))?;
        Self::from_json(&content, semantic)
    }

    pub fn from_json(content: &str, semantic: bool) -> Result<Self, CatalogError> {
        let snapshot: Snapshot = serde_json::from_str(content)?;
        Self::from_snapshot(snapshot, semantic)
    }

    /// Build from already-resolved records.
    #[cfg(test)]
    pub fn from_parts(
        prompts: Vec<Prompt>,
        categories: Vec<Category>,
        tags: Vec<Tag>,
        users: Vec<User>,
    ) -> Self {
        Self {
            prompts,
            categories,
            tags,
            users,
            semantic: false,
        }
    }

    /// Enable or disable the semantic search capability.
    #[cfg(test)]
    pub fn with_semantic(mut self, enabled: bool) -> Self {
        self.semantic = enabled;
        self
    }

    fn from_snapshot(snapshot: Snapshot, semantic: bool) -> Result<Self, CatalogError> {
        let users: HashMap<&str, &User> =
            snapshot.users.iter().map(|u| (u.id.as_str(), u)).collect();
        let categories: HashMap<&str, &Category> = snapshot
            .categories
            .iter()
            .map(|c| (c.id.as_str(), c))
            .collect();
        let tags: HashMap<&str, &Tag> = snapshot.tags.iter().map(|t| (t.slug.as_str(), t)).collect();

        let prompts = snapshot
            .prompts
            .into_iter()
            .map(|record| resolve_prompt(record, &users, &categories, &tags))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            prompts,
            categories: snapshot.categories,
            tags: snapshot.tags,
            users: snapshot.users,
            semantic,
        })
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    fn public_matching<'a>(&'a self, filter: &'a PromptFilter) -> impl Iterator<Item = &'a Prompt> {
        let query = filter.query.as_deref().map(str::to_lowercase);
        self.prompts
            .iter()
            .filter(|p| p.is_public())
            .filter(move |p| matches_filter(p, filter, query.as_deref()))
    }
}

fn resolve_prompt(
    record: PromptRecord,
    users: &HashMap<&str, &User>,
    categories: &HashMap<&str, &Category>,
    tags: &HashMap<&str, &Tag>,
) -> Result<Prompt, CatalogError> {
    let author = users
        .get(record.author_id.as_str())
        .map(|user| Author::from(*user))
        .ok_or_else(|| CatalogError::UnknownAuthor {
            prompt: record.id.clone(),
            author: record.author_id.clone(),
        })?;

    let category = match &record.category_id {
        Some(id) => {
            let category = categories
                .get(id.as_str())
                .ok_or_else(|| CatalogError::UnknownReference {
                    prompt: record.id.clone(),
                    kind: "category",
                    id: id.clone(),
                })?;
            Some(CategoryRef {
                id: category.id.clone(),
                name: category.name.clone(),
                slug: category.slug.clone(),
            })
        }
        None => None,
    };

    let resolved_tags = record
        .tags
        .iter()
        .map(|slug| {
            tags.get(slug.as_str())
                .map(|tag| (*tag).clone())
                .ok_or_else(|| CatalogError::UnknownReference {
                    prompt: record.id.clone(),
                    kind: "tag",
                    id: slug.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Prompt {
        slug: record.slug,
        title: record.title,
        description: record.description,
        content: record.content,
        kind: record.kind,
        category,
        tags: resolved_tags,
        author,
        contributor_count: record.contributor_ids.len(),
        vote_count: record.vote_count,
        is_private: record.is_private,
        is_unlisted: record.is_unlisted,
        deleted_at: record.deleted_at,
        updated_at: record.updated_at.unwrap_or(record.created_at),
        created_at: record.created_at,
        id: record.id,
    })
}

fn matches_filter(prompt: &Prompt, filter: &PromptFilter, query: Option<&str>) -> bool {
    if let Some(q) = query.filter(|q| !q.is_empty()) {
        let hit = prompt.title.to_lowercase().contains(q)
            || prompt.content.to_lowercase().contains(q)
            || prompt
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(q));
        if !hit {
            return false;
        }
    }
    if let Some(kind) = &filter.kind
        && &prompt.kind != kind
    {
        return false;
    }
    if let Some(id) = &filter.category_id
        && prompt.category.as_ref().is_none_or(|c| &c.id != id)
    {
        return false;
    }
    if let Some(slug) = &filter.tag_slug
        && !prompt.tags.iter().any(|t| &t.slug == slug)
    {
        return false;
    }
    true
}

fn sort_prompts(prompts: &mut [&Prompt], order: PromptOrder) {
    match order {
        PromptOrder::Newest => prompts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        PromptOrder::Oldest => prompts.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        PromptOrder::Upvotes => prompts.sort_by(|a, b| {
            b.vote_count
                .cmp(&a.vote_count)
                .then_with(|| b.created_at.cmp(&a.created_at))
        }),
    }
}

/// Lowercased distinct alphanumeric terms of a query.
fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for term in query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
    {
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

fn relevance(prompt: &Prompt, terms: &[String]) -> usize {
    let haystack = format!(
        "{} {} {}",
        prompt.title,
        prompt.description.as_deref().unwrap_or_default(),
        prompt.content
    )
    .to_lowercase();
    terms.iter().filter(|t| haystack.contains(t.as_str())).count()
}

impl Catalog for MemoryCatalog {
    async fn find_prompts(
        &self,
        filter: &PromptFilter,
        order: PromptOrder,
        page: PageRequest,
    ) -> Result<Vec<Prompt>, CatalogError> {
        let mut matching: Vec<&Prompt> = self.public_matching(filter).collect();
        sort_prompts(&mut matching, order);

        let window = matching.into_iter().skip(page.skip);
        Ok(match page.take {
            Some(take) => window.take(take).cloned().collect(),
            None => window.cloned().collect(),
        })
    }

    async fn count_prompts(&self, filter: &PromptFilter) -> Result<usize, CatalogError> {
        Ok(self.public_matching(filter).count())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let mut categories = self.categories.clone();
        categories.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
        Ok(categories)
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, CatalogError> {
        let mut tags = self.tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn list_public_authors(&self) -> Result<Vec<User>, CatalogError> {
        Ok(self
            .users
            .iter()
            .filter(|user| {
                self.prompts
                    .iter()
                    .any(|p| p.is_public() && p.author.id == user.id)
            })
            .cloned()
            .collect())
    }

    fn semantic_search_enabled(&self) -> bool {
        self.semantic
    }

    async fn semantic_search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Prompt>, CatalogError> {
        if !self.semantic {
            return Err(CatalogError::SemanticUnavailable);
        }

        let terms = query_terms(query);
        let mut scored: Vec<(usize, &Prompt)> = self
            .prompts
            .iter()
            .filter(|p| p.is_public())
            .map(|p| (relevance(p, &terms), p))
            .filter(|(score, _)| *score > 0)
            .collect();
        scored.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then_with(|| b.created_at.cmp(&a.created_at)));

        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(_, p)| p.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const SNAPSHOT: &str = r#"{
        "users": [
            { "id": "u1", "username": "alice", "name": "Alice", "updated_at": "2024-03-01T00:00:00Z" },
            { "id": "u2", "username": "bob", "updated_at": "2024-03-02T00:00:00Z" },
            { "id": "u3", "username": "carol", "updated_at": "2024-03-03T00:00:00Z" }
        ],
        "categories": [
            { "id": "c2", "name": "Writing", "slug": "writing", "order": 1 },
            { "id": "c1", "name": "Coding", "slug": "coding", "order": 0 },
            { "id": "c3", "name": "Art", "slug": "art", "order": 1 }
        ],
        "tags": [
            { "id": "t2", "name": "Midjourney", "slug": "midjourney" },
            { "id": "t1", "name": "ChatGPT", "slug": "chatgpt" }
        ],
        "prompts": [
            { "id": "p1", "slug": "code-review", "title": "Code Review Helper",
              "description": "Reviews pull requests", "content": "Act as a senior engineer",
              "author_id": "u1", "category_id": "c1", "tags": ["chatgpt"], "vote_count": 3,
              "contributor_ids": ["u2"],
              "created_at": "2024-01-10T00:00:00Z", "updated_at": "2024-02-01T00:00:00Z" },
            { "id": "p2", "title": "Poster Art", "type": "IMAGE", "content": "A vivid poster",
              "author_id": "u2", "category_id": "c3", "tags": ["midjourney"], "vote_count": 9,
              "created_at": "2024-01-12T00:00:00Z" },
            { "id": "p3", "title": "Secret", "content": "code", "author_id": "u3",
              "is_private": true, "created_at": "2024-01-13T00:00:00Z" },
            { "id": "p4", "title": "Hidden", "content": "code", "author_id": "u3",
              "is_unlisted": true, "created_at": "2024-01-14T00:00:00Z" },
            { "id": "p5", "title": "Removed", "content": "code", "author_id": "u3",
              "deleted_at": "2024-01-20T00:00:00Z", "created_at": "2024-01-15T00:00:00Z" },
            { "id": "p6", "title": "Essay outline", "content": "Write an essay about code",
              "author_id": "u1", "category_id": "c2", "vote_count": 3,
              "created_at": "2024-01-11T00:00:00Z" }
        ]
    }"#;

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::from_json(SNAPSHOT, true).unwrap()
    }

    fn ids(prompts: &[Prompt]) -> Vec<&str> {
        prompts.iter().map(|p| p.id.as_str()).collect()
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    #[test]
    fn test_load_resolves_references() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 6);

        let p1 = &catalog.prompts[0];
        assert_eq!(p1.author.display_name(), Some("Alice"));
        assert_eq!(p1.category.as_ref().map(|c| c.slug.as_str()), Some("coding"));
        assert_eq!(p1.tags[0].name, "ChatGPT");
        assert_eq!(p1.contributor_count, 1);

        let p2 = &catalog.prompts[1];
        assert_eq!(p2.kind, "IMAGE");
        assert_eq!(p2.updated_at, p2.created_at);
    }

    #[test]
    fn test_load_from_file() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), SNAPSHOT).unwrap();
        let catalog = MemoryCatalog::load(file.path(), false).unwrap();
        assert!(!catalog.semantic_search_enabled());
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_unknown_author() {
        let json = r#"{ "prompts": [{ "id": "p1", "title": "x", "author_id": "ghost",
                        "created_at": "2024-01-01" }] }"#;
        let err = MemoryCatalog::from_json(json, false).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownAuthor { .. }));
    }

    #[test]
    fn test_unknown_tag() {
        let json = r#"{ "users": [{ "id": "u1", "username": "a", "updated_at": "2024-01-01" }],
                        "prompts": [{ "id": "p1", "title": "x", "author_id": "u1",
                        "tags": ["nope"], "created_at": "2024-01-01" }] }"#;
        let err = MemoryCatalog::from_json(json, false).unwrap_err();
        assert!(err.to_string().contains("unknown tag `nope`"));
    }

    #[test]
    fn test_public_only_newest_first() {
        let catalog = catalog();
        let prompts = block_on(catalog.find_prompts(
            &PromptFilter::default(),
            PromptOrder::Newest,
            PageRequest::all(),
        ))
        .unwrap();
        assert_eq!(ids(&prompts), ["p2", "p6", "p1"]);
        assert_eq!(block_on(catalog.count_prompts(&PromptFilter::default())).unwrap(), 3);
    }

    #[test]
    fn test_orders() {
        let catalog = catalog();
        let all = PromptFilter::default();

        let oldest = block_on(catalog.find_prompts(&all, PromptOrder::Oldest, PageRequest::all()));
        assert_eq!(ids(&oldest.unwrap()), ["p1", "p6", "p2"]);

        // p1 and p6 tie on votes, newer first
        let upvotes = block_on(catalog.find_prompts(&all, PromptOrder::Upvotes, PageRequest::all()));
        assert_eq!(ids(&upvotes.unwrap()), ["p2", "p6", "p1"]);
    }

    #[test]
    fn test_paging() {
        let catalog = catalog();
        let all = PromptFilter::default();
        let page = block_on(catalog.find_prompts(&all, PromptOrder::Newest, PageRequest::page(2, 2)));
        assert_eq!(ids(&page.unwrap()), ["p1"]);
    }

    #[test]
    fn test_keyword_filters() {
        let catalog = catalog();
        let run = |filter: PromptFilter| {
            ids(&block_on(catalog.find_prompts(&filter, PromptOrder::Newest, PageRequest::all())).unwrap())
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        };

        let by_query = |q: &str| PromptFilter {
            query: Some(q.into()),
            ..Default::default()
        };
        // title, description and content are all searched, case-insensitively
        assert_eq!(run(by_query("REVIEW")), ["p1"]);
        assert_eq!(run(by_query("pull requests")), ["p1"]);
        assert_eq!(run(by_query("vivid")), ["p2"]);
        assert_eq!(run(by_query("code")), ["p6", "p1"]);

        let by_kind = PromptFilter {
            kind: Some("IMAGE".into()),
            ..Default::default()
        };
        assert_eq!(run(by_kind), ["p2"]);

        let by_category = PromptFilter {
            category_id: Some("c2".into()),
            ..Default::default()
        };
        assert_eq!(run(by_category), ["p6"]);

        let by_tag = PromptFilter {
            tag_slug: Some("chatgpt".into()),
            query: Some("helper".into()),
            ..Default::default()
        };
        assert_eq!(run(by_tag), ["p1"]);
    }

    #[test]
    fn test_taxonomy_ordering() {
        let catalog = catalog();
        let categories = block_on(catalog.list_categories()).unwrap();
        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Coding", "Art", "Writing"]);

        let tags = block_on(catalog.list_tags()).unwrap();
        let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["ChatGPT", "Midjourney"]);
    }

    #[test]
    fn test_public_authors() {
        let catalog = catalog();
        let users = block_on(catalog.list_public_authors()).unwrap();
        let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
        // carol only has private, unlisted or deleted prompts
        assert_eq!(names, ["alice", "bob"]);
    }

    #[test]
    fn test_semantic_search() {
        let catalog = catalog();
        let results = block_on(catalog.semantic_search("review code please", 12)).unwrap();
        // p1 matches "review" and "code", p6 only "code"
        assert_eq!(ids(&results), ["p1", "p6"]);

        let limited = block_on(catalog.semantic_search("review code", 1)).unwrap();
        assert_eq!(ids(&limited), ["p1"]);

        assert!(block_on(catalog.semantic_search("zebra", 12)).unwrap().is_empty());
    }

    #[test]
    fn test_semantic_search_disabled() {
        let catalog = catalog().with_semantic(false);
        let err = block_on(catalog.semantic_search("code", 12)).unwrap_err();
        assert!(matches!(err, CatalogError::SemanticUnavailable));
    }
}
