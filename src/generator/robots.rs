//! robots.txt generation.

use crate::seo::Origin;

const ALLOW: &[&str] = &[
    "/",
    "/prompts",
    "/categories",
    "/tags",
    "/discover",
    "/promptmasters",
];

const DISALLOW: &[&str] = &[
    "/api",
    "/admin",
    "/settings",
    "/feed",
    "/auth",
    "/prompts/new",
];

/// Crawler rules for every user agent, pointing at the sitemap.
pub fn build_robots(origin: &Origin) -> String {
    let mut out = String::from("User-agent: *\n");
    for path in ALLOW {
        out.push_str("Allow: ");
        out.push_str(path);
        out.push('\n');
    }
    for path in DISALLOW {
        out.push_str("Disallow: ");
        out.push_str(path);
        out.push('\n');
    }
    out.push_str("\nSitemap: ");
    out.push_str(&origin.join("/sitemap.xml"));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robots() {
        let origin = Origin::parse("https://prompts.example").unwrap();
        let robots = build_robots(&origin);

        assert!(robots.starts_with("User-agent: *\nAllow: /\n"));
        assert!(robots.contains("Allow: /promptmasters\n"));
        assert!(robots.contains("Disallow: /prompts/new\n"));
        assert!(robots.contains("Disallow: /api\n"));
        assert!(robots.ends_with("Sitemap: https://prompts.example/sitemap.xml\n"));
        assert_eq!(robots.matches("Allow:").count(), 6);
        assert_eq!(robots.matches("Disallow:").count(), 6);
    }
}
