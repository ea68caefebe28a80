//! SEO surface generators.
//!
//! Produces the machine-readable documents served at the site root:
//!
//! - **Sitemap**: search engine indexing with hreflang alternates (`sitemap.xml`)
//! - **Feed**: RSS 2.0 feed of the newest public prompts (`feed.xml`)
//! - **Robots**: crawler rules (`robots.txt`)
//!
//! Each generator is a pure function of the configuration, the resolved
//! origin and a catalog read; nothing is cached between requests.

pub mod feed;
pub mod robots;
pub mod sitemap;

use std::borrow::Cow;

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

/// Assert that a document is well-formed XML.
#[cfg(test)]
pub(crate) fn assert_well_formed(xml: &str) {
    use quick_xml::Reader;
    use quick_xml::events::Event;

    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => depth -= 1,
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("malformed XML at {}: {e}\n{xml}", reader.buffer_position()),
        }
    }
    assert_eq!(depth, 0, "unbalanced XML:\n{xml}");
}
