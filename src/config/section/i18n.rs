//! `[i18n]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [i18n]
//! locales = ["en", "de", "ja"]   # order is kept in generated output
//! default_locale = "en"          # served without a path prefix
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Configured locale codes, non-empty.
    pub locales: Vec<String>,

    /// Locale served without prefix, must be one of `locales`.
    pub default_locale: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locales: vec!["en".into()],
            default_locale: "en".into(),
        }
    }
}

impl I18nConfig {
    const LOCALES: FieldPath = FieldPath::new("i18n.locales");
    const DEFAULT_LOCALE: FieldPath = FieldPath::new("i18n.default_locale");

    /// Validate locale configuration.
    ///
    /// # Checks
    /// - `locales` is non-empty, without duplicates
    /// - each code is a single path segment
    /// - `default_locale` is one of `locales`
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.locales.is_empty() {
            diag.error_with_hint(
                Self::LOCALES,
                "no locales configured",
                "set locales = [\"en\"]",
            );
            return;
        }

        for (i, locale) in self.locales.iter().enumerate() {
            if locale.is_empty() || locale.contains(['/', '?', '#']) {
                diag.error(
                    Self::LOCALES,
                    format!("'{locale}' is not a valid locale code"),
                );
            }
            if self.locales[..i].contains(locale) {
                diag.error(Self::LOCALES, format!("'{locale}' is listed twice"));
            }
        }

        if !self.locales.contains(&self.default_locale) {
            diag.error_with_hint(
                Self::DEFAULT_LOCALE,
                format!("'{}' is not in {}", self.default_locale, Self::LOCALES),
                format!("add it to locales or use one of {:?}", self.locales),
            );
        }
    }
}
