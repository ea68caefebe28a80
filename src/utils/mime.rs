//! MIME type constants for the HTTP surfaces.

pub mod types {
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const XML: &str = "application/xml; charset=utf-8";
    pub const RSS: &str = "application/rss+xml; charset=utf-8";
}
