//! SEO primitives shared by pages and generators.
//!
//! | Module   | Purpose                                         |
//! |----------|-------------------------------------------------|
//! | `origin` | Resolve the application origin for a request    |
//! | `links`  | Canonical and alternate-language URLs           |
//! | `meta`   | Page metadata (Open Graph, Twitter Card)        |

pub mod links;
pub mod meta;
pub mod origin;

pub use links::{LinkBuilder, X_DEFAULT};
pub use meta::{MetadataContext, MetadataInput, PageMetadata, build_metadata};
pub use origin::{Origin, RequestHeaders, resolve_base_url};
