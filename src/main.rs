//! promptdeck - localized SEO surfaces for a prompt library site.

mod catalog;
mod cli;
mod config;
mod core;
mod generator;
mod logger;
mod page;
mod search;
mod seo;
mod utils;

use anyhow::{Context, Result};
use catalog::MemoryCatalog;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, serve::ServerContext};
use config::SiteConfig;
use std::sync::Arc;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;
    let catalog = MemoryCatalog::load(&config.catalog.path, config.features.ai_search)
        .with_context(|| format!("Failed to load catalog {}", config.catalog.path.display()))?;
    log!("catalog"; "{} loaded", utils::plural::plural_count(catalog.len(), "prompt"));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    match &cli.command {
        Commands::Build { .. } => runtime
            .block_on(cli::build::build_site(&catalog, &config))
            .map(|_| ()),
        Commands::Serve { .. } => cli::serve::serve(ServerContext {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            runtime: runtime.handle().clone(),
        }),
    }
}
