//! `[catalog]` and `[build]` section configuration.
//!
//! ```toml
//! [catalog]
//! path = "data/catalog.json"   # JSON snapshot of prompts, taxonomies, users
//!
//! [build]
//! output = "public"            # where `build` writes sitemap/feed/robots
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Snapshot path, relative to the project root.
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: "catalog.json".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Output directory, relative to the project root.
    pub output: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: "public".into(),
        }
    }
}
