//! CLI configuration file
//!
//! ```toml
//! log_filter = "info"
//!
//! [preview]
//! format = "yaml"
//! prune_empty = true
//! ```
//!
//! Every key is optional. Command-line flags override what the file says.

use std::path::Path;

use anyhow::Context;
use devfile_model::{PreviewFormat, PreviewOptions};
use serde::{Deserialize, Serialize};

/// Filter used when neither `RUST_LOG` nor the config file sets one
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings read from the configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// `tracing` filter directive, e.g. `devfile_wizard=debug`
    pub log_filter: Option<String>,
    /// Preview rendering defaults
    pub preview: PreviewOptions,
}

impl CliConfig {
    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// Returns error if the text is not valid TOML or has unknown keys
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read configuration from `path`
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Read configuration from `path` when given, defaults otherwise
    ///
    /// # Errors
    /// Returns error if a given file cannot be read or parsed
    pub fn load_optional(path: Option<&Path>) -> anyhow::Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Effective log filter
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Preview options with command-line overrides applied
    #[must_use]
    pub fn preview_options(&self, format: Option<PreviewFormat>, keep_empty: bool) -> PreviewOptions {
        let mut options = self.preview;
        if let Some(format) = format {
            options = options.with_format(format);
        }
        if keep_empty {
            options = options.with_prune_empty(false);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = CliConfig::from_toml_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.log_filter(), "warn");
        assert_eq!(config.preview, PreviewOptions::default());
    }

    #[test]
    fn full_file() {
        let config = CliConfig::from_toml_str(
            r#"
            log_filter = "devfile_wizard=debug"

            [preview]
            format = "json"
            prune_empty = false
            "#,
        )
        .unwrap();

        assert_eq!(config.log_filter(), "devfile_wizard=debug");
        assert_eq!(config.preview.format, PreviewFormat::Json);
        assert!(!config.preview.prune_empty);
    }

    #[test]
    fn partial_preview_table_keeps_defaults() {
        let config = CliConfig::from_toml_str("[preview]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.preview.format, PreviewFormat::Json);
        assert!(config.preview.prune_empty);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(CliConfig::from_toml_str("colour = true").is_err());
    }

    #[test]
    fn flags_override_file() {
        let config = CliConfig::default();
        let options = config.preview_options(Some(PreviewFormat::Json), true);
        assert_eq!(options.format, PreviewFormat::Json);
        assert!(!options.prune_empty);

        assert_eq!(config.preview_options(None, false), config.preview);
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_filter = \"info\"").unwrap();

        let config = CliConfig::load_optional(Some(file.path())).unwrap();
        assert_eq!(config.log_filter(), "info");

        let missing = CliConfig::load(&file.path().with_extension("missing"));
        assert!(missing.is_err());
    }
}
