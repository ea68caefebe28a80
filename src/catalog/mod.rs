//! Read-only access to prompts, taxonomies and users.
//!
//! | Module   | Purpose                                        |
//! |----------|------------------------------------------------|
//! | `model`  | Records (Prompt, Category, Tag, User)          |
//! | `memory` | Snapshot-backed [`MemoryCatalog`]              |
//!
//! Generators and pages only see the [`Catalog`] trait. Every method returns
//! public data only: private, unlisted and soft-deleted prompts never leave
//! the catalog.

mod memory;
pub mod model;

pub use memory::MemoryCatalog;
pub use model::{Category, Prompt, Tag, User};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Catalog snapshot parsing error")]
    Json(#[from] serde_json::Error),

    #[error("prompt `{prompt}` references unknown author `{author}`")]
    UnknownAuthor { prompt: String, author: String },

    #[error("prompt `{prompt}` references unknown {kind} `{id}`")]
    UnknownReference {
        prompt: String,
        kind: &'static str,
        id: String,
    },

    #[error("semantic search is not available")]
    SemanticUnavailable,
}

/// Keyword filter over public prompts. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptFilter {
    /// Case-insensitive substring of title, content or description.
    pub query: Option<String>,
    /// Prompt type.
    pub kind: Option<String>,
    pub category_id: Option<String>,
    pub tag_slug: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptOrder {
    /// `created_at` descending.
    #[default]
    Newest,
    /// `created_at` ascending.
    Oldest,
    /// Vote count descending, newest first among equals.
    Upvotes,
}

impl PromptOrder {
    /// Parse a `sort` query value; unknown values yield `None`.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "newest" => Some(Self::Newest),
            "oldest" => Some(Self::Oldest),
            "upvotes" => Some(Self::Upvotes),
            _ => None,
        }
    }

    /// The `sort` query value for this order.
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Upvotes => "upvotes",
        }
    }
}

/// Skip/take window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: usize,
    pub take: Option<usize>,
}

impl PageRequest {
    pub const fn all() -> Self {
        Self {
            skip: 0,
            take: None,
        }
    }

    pub const fn first(take: usize) -> Self {
        Self {
            skip: 0,
            take: Some(take),
        }
    }

    /// 1-based page of `per_page` items. Page 0 is treated as page 1;
    /// a skip past `usize::MAX` saturates and yields an empty window.
    pub const fn page(page: usize, per_page: usize) -> Self {
        Self {
            skip: page.saturating_sub(1).saturating_mul(per_page),
            take: Some(per_page),
        }
    }
}

/// Data collaborator.
#[allow(async_fn_in_trait)]
pub trait Catalog: Send + Sync {
    /// Public prompts matching `filter`, ordered and windowed.
    async fn find_prompts(
        &self,
        filter: &PromptFilter,
        order: PromptOrder,
        page: PageRequest,
    ) -> Result<Vec<Prompt>, CatalogError>;

    /// Number of public prompts matching `filter`.
    async fn count_prompts(&self, filter: &PromptFilter) -> Result<usize, CatalogError>;

    /// Categories by display order, then name.
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError>;

    /// Tags by name.
    async fn list_tags(&self) -> Result<Vec<Tag>, CatalogError>;

    /// Users with at least one public prompt.
    async fn list_public_authors(&self) -> Result<Vec<User>, CatalogError>;

    fn semantic_search_enabled(&self) -> bool;

    /// Public prompts ranked by relevance to `query`.
    async fn semantic_search(&self, query: &str, limit: usize)
    -> Result<Vec<Prompt>, CatalogError>;
}
