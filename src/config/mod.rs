//! Site configuration management for `promptdeck.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── site       # [site]
//! │   ├── i18n       # [i18n]
//! │   ├── features   # [features], [homepage]
//! │   ├── catalog    # [catalog], [build]
//! │   └── serve      # [serve]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    BuildConfig, CatalogConfig, FeaturesConfig, HomepageConfig, I18nConfig, ServeConfig,
    SiteImage, SiteInfoConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands},
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing promptdeck.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Branding and explicit origin
    #[serde(default)]
    pub site: SiteInfoConfig,

    /// Locales
    #[serde(default)]
    pub i18n: I18nConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeaturesConfig,

    /// Homepage branding
    #[serde(default)]
    pub homepage: HomepageConfig,

    /// Data snapshot
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// HTTP server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Static output settings
    #[serde(default)]
    pub build: BuildConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. The project root is
    /// the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = find_config_file(&cli.config)
            .ok_or_else(|| ConfigError::NotFound(cli.config.clone()))?;

        let mut config = Self::from_path(&config_path)?;
        config.config_path = config_path;
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        self.apply_command_options(cli);
        self.normalize_paths(&root);
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Explicitly configured application origin, if any.
    pub fn explicit_origin(&self) -> Option<&str> {
        self.site.url.as_deref().filter(|url| !url.trim().is_empty())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        let common = cli.common();
        crate::logger::set_verbose(common.verbose);

        // An origin from --site-url or PROMPTDECK_URL wins over site.url
        if let Some(url) = &common.site_url {
            self.site.url = Some(url.clone());
        }
        Self::update_option(&mut self.catalog.path, common.catalog.as_ref());

        match &cli.command {
            Commands::Serve {
                interface, port, ..
            } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
            Commands::Build { output, .. } => {
                Self::update_option(&mut self.build.output, output.as_ref());
            }
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Resolve relative paths against the project root.
    fn normalize_paths(&mut self, root: &Path) {
        self.root = root.to_path_buf();
        self.catalog.path = self.root_join(&self.catalog.path);
        self.build.output = self.root_join(&self.build.output);
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.i18n.validate(&mut diag);

        if self.serve.workers == 0 {
            diag.warn(
                FieldPath::new("serve.workers"),
                "0 workers requested, using 1",
            );
        }

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with minimal required `[site]` fields.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!("[site]\nname = \"Test\"\ndescription = \"Test\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CommonArgs;
    use clap::ColorChoice;

    fn build_cli(common: CommonArgs, output: Option<PathBuf>) -> Cli {
        Cli {
            color: ColorChoice::Never,
            config: PathBuf::from("promptdeck.toml"),
            command: Commands::Build { common, output },
        }
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let result = SiteConfig::parse_with_ignored("[site\nname = \"Prompts\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();

        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.site.name, "");
        assert_eq!(config.i18n.default_locale, "en");
        assert_eq!(config.serve.port, 3000);
        assert!(config.explicit_origin().is_none());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\nname = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.site.name, "Test");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[site]\nname = \"Test\"\ndescription = \"Test\"";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = test_parse_config("");
        config.site.url = Some("https://config.example".into());
        config.config_path = PathBuf::from("/srv/site/promptdeck.toml");

        let cli = build_cli(
            CommonArgs {
                site_url: Some("https://cli.example".into()),
                catalog: Some("snap.json".into()),
                verbose: false,
            },
            Some("dist".into()),
        );
        config.finalize(&cli);

        assert_eq!(config.explicit_origin(), Some("https://cli.example"));
        assert_eq!(config.root, PathBuf::from("/srv/site"));
        assert_eq!(config.catalog.path, PathBuf::from("/srv/site/snap.json"));
        assert_eq!(config.build.output, PathBuf::from("/srv/site/dist"));
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = test_parse_config("[i18n]\nlocales = [\"en\"]\ndefault_locale = \"fr\"");
        config.site.name.clear();
        let err = config.validate().unwrap_err();
        match err.downcast_ref::<ConfigError>() {
            Some(ConfigError::Diagnostics(diag)) => assert_eq!(diag.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_explicit_origin_is_ignored() {
        let mut config = test_parse_config("");
        config.site.url = Some("  ".into());
        assert!(config.explicit_origin().is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("promptdeck.toml");
        fs::write(
            &path,
            "[site]\nname = \"Prompts\"\ndescription = \"d\"\n[i18n]\nlocales = [\"en\", \"de\"]\ndefault_locale = \"en\"",
        )
        .unwrap();

        let cli = Cli {
            color: ColorChoice::Never,
            config: path.clone(),
            command: Commands::Build {
                common: CommonArgs::default(),
                output: None,
            },
        };
        let config = SiteConfig::load(&cli).unwrap();
        assert_eq!(config.site.name, "Prompts");
        assert!(config.i18n.locales.iter().any(|l| l == "de"));
        assert_eq!(config.build.output, dir.path().join("public"));
    }
}
