//! Server-rendered pages.
//!
//! | Module       | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `params`     | Listing query-string parsing                   |
//! | `structured` | JSON-LD structured data                        |
//! | `render`     | `<head>` tags and HTML documents               |
//! | `prompts`    | `/prompts` listing                             |
//! | `discover`   | `/discover`                                    |

pub mod discover;
pub mod params;
pub mod prompts;
pub mod render;
pub mod structured;

pub use discover::discover_page;
pub use params::ListingParams;
pub use prompts::prompts_page;
