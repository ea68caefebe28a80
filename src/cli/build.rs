//! Static output of the machine-readable surfaces.
//!
//! Writes `sitemap.xml`, `feed.xml` and `robots.txt` into the output
//! directory. There are no request headers here, so the origin is the
//! configured site URL or the local default.

use crate::{
    catalog::Catalog,
    config::SiteConfig,
    generator::{feed::build_feed, robots::build_robots, sitemap},
    log,
    seo::{Origin, resolve_base_url},
    utils::{date::DateTimeUtc, plural::plural_count},
};
use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

/// Files produced by one build, in write order.
const OUTPUTS: [&str; 3] = ["sitemap.xml", "feed.xml", "robots.txt"];

/// Generate every surface and write it to `config.build.output`.
pub async fn build_site<C: Catalog>(catalog: &C, config: &SiteConfig) -> Result<Vec<PathBuf>> {
    let origin = resolve_base_url(config.explicit_origin(), None);
    if config.explicit_origin().is_none() {
        log!("build"; "no site url configured, using {}", origin);
    }

    let documents = render_all(catalog, config, &origin).await?;

    let output = &config.build.output;
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let mut written = Vec::with_capacity(documents.len());
    for (name, content) in OUTPUTS.into_iter().zip(documents) {
        let path = output.join(name);
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    log!("build"; "{} written to {}", plural_count(written.len(), "file"), output.display());
    Ok(written)
}

async fn render_all<C: Catalog>(
    catalog: &C,
    config: &SiteConfig,
    origin: &Origin,
) -> Result<[String; 3]> {
    let (entries, feed) = tokio::try_join!(
        sitemap::build_sitemap(catalog, config, origin),
        build_feed(catalog, config, origin, DateTimeUtc::now()),
    )
    .context("Failed to read catalog")?;

    Ok([
        sitemap::render_sitemap(&entries),
        feed,
        build_robots(origin),
    ])
}
