//! Logical paths of the site's entities.

/// `/prompts/{id}_{slug}`, or `/prompts/{id}` for prompts without a slug.
pub fn prompt_path(id: &str, slug: Option<&str>) -> String {
    match slug.filter(|s| !s.is_empty()) {
        Some(slug) => format!("/prompts/{id}_{slug}"),
        None => format!("/prompts/{id}"),
    }
}

pub fn user_path(username: &str) -> String {
    format!("/@{username}")
}

pub fn category_path(slug: &str) -> String {
    format!("/categories/{slug}")
}

pub fn tag_path(slug: &str) -> String {
    format!("/tags/{slug}")
}
