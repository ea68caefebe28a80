//! Configuration section definitions.
//!
//! Each module corresponds to a section in `promptdeck.toml`:
//!
//! | Module     | TOML Section               | Purpose                          |
//! |------------|----------------------------|----------------------------------|
//! | `site`     | `[site]`                   | Branding and explicit origin     |
//! | `i18n`     | `[i18n]`                   | Locales and default locale       |
//! | `features` | `[features]`, `[homepage]` | Feature flags                    |
//! | `catalog`  | `[catalog]`, `[build]`     | Data snapshot and output paths   |
//! | `serve`    | `[serve]`                  | HTTP server                      |

mod catalog;
mod features;
mod i18n;
mod serve;
mod site;

pub use catalog::{BuildConfig, CatalogConfig};
pub use features::{FeaturesConfig, HomepageConfig};
pub use i18n::I18nConfig;
pub use serve::ServeConfig;
pub use site::{SiteImage, SiteInfoConfig};
