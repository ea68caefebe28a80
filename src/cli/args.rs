//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Prompt library SEO surface server and generator
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: promptdeck.toml)
    #[arg(short = 'C', long, global = true, default_value = "promptdeck.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve sitemap, feed, robots and listing pages over HTTP
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        common: CommonArgs,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Write sitemap.xml, feed.xml and robots.txt to the output directory
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        common: CommonArgs,

        /// Output directory path (relative to project root)
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,
    },
}

/// Shared arguments for Serve and Build commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Override the application origin.
    ///
    /// When set, every generated URL uses this origin and request headers
    /// are ignored.
    ///
    /// Example:
    ///   promptdeck build --site-url "https://prompts.example"
    #[arg(short = 'U', long = "site-url", env = "PROMPTDECK_URL", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Catalog snapshot (JSON) to read prompts, taxonomies and users from
    #[arg(short = 'D', long, value_hint = clap::ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Cli {
    /// Arguments shared by every command.
    pub const fn common(&self) -> &CommonArgs {
        match &self.command {
            Commands::Serve { common, .. } | Commands::Build { common, .. } => common,
        }
    }
}
