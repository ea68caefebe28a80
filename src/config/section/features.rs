//! `[features]` and `[homepage]` section configuration.
//!
//! ```toml
//! [features]
//! categories = true    # /categories listing and sitemap entries
//! tags = true          # /tags listing and sitemap entries
//! mcp = true           # MCP server link on listing pages
//! ai_search = false    # semantic search for ?ai=1 queries
//!
//! [homepage]
//! use_clone_branding = false   # hide upstream-branded widgets
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    pub categories: bool,
    pub tags: bool,
    pub mcp: bool,
    pub ai_search: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            categories: true,
            tags: true,
            mcp: true,
            ai_search: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HomepageConfig {
    pub use_clone_branding: bool,
}
