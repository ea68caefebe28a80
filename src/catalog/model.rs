//! Records served by a [`Catalog`](super::Catalog).

use serde::{Deserialize, Serialize};

use crate::core::route::{category_path, prompt_path, tag_path, user_path};
use crate::utils::date::DateTimeUtc;

/// Prompt author, as embedded in a [`Prompt`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
}

impl Author {
    /// Display name, preferring the full name over the username.
    ///
    /// `None` when both are empty.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| Some(self.username.as_str()).filter(|u| !u.is_empty()))
    }

    pub fn path(&self) -> String {
        user_path(&self.username)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Display order, ascending.
    #[serde(default)]
    pub order: i32,
}

impl Category {
    pub fn path(&self) -> String {
        category_path(&self.slug)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl Tag {
    pub fn path(&self) -> String {
        tag_path(&self.slug)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    pub updated_at: DateTimeUtc,
}

impl User {
    pub fn path(&self) -> String {
        user_path(&self.username)
    }
}

impl From<&User> for Author {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            name: user.name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

/// A prompt with its references resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub id: String,
    pub slug: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    /// Prompt type, e.g. `TEXT`, `IMAGE`, `STRUCTURED`.
    #[serde(rename = "type")]
    pub kind: String,
    pub category: Option<CategoryRef>,
    pub tags: Vec<Tag>,
    pub author: Author,
    pub contributor_count: usize,
    pub vote_count: u32,
    pub is_private: bool,
    pub is_unlisted: bool,
    pub deleted_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl Prompt {
    /// Listed publicly: not private, not unlisted, not soft-deleted.
    pub fn is_public(&self) -> bool {
        !self.is_private && !self.is_unlisted && self.deleted_at.is_none()
    }

    /// Description, `None` when absent or blank.
    pub fn summary(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|desc| !desc.trim().is_empty())
    }

    pub fn path(&self) -> String {
        prompt_path(&self.id, self.slug.as_deref())
    }
}
