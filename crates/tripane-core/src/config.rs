//! Explorer configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::listing::ListingOptions;

/// Configuration for a browsing session.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ExplorerConfig {
    /// Root shown in the first pane.
    pub root: PathBuf,

    /// Include hidden files (starting with .).
    #[builder(default = "false")]
    #[serde(default)]
    pub show_hidden: bool,

    /// Carry access/modification times over to copies.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub preserve_metadata: bool,

    /// Where a drop onto a non-directory row copies to (None = desktop).
    #[builder(default)]
    #[serde(default)]
    pub drop_fallback: Option<PathBuf>,

    /// Command used instead of the platform opener (path is appended).
    #[builder(default)]
    #[serde(default)]
    pub opener: Option<String>,
}

fn default_true() -> bool {
    true
}

impl ExplorerConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match &self.root {
            Some(root) if root.as_os_str().is_empty() => {
                Err("Root path cannot be empty".to_string())
            }
            Some(_) => Ok(()),
            None => Err("Root path is required".to_string()),
        }
    }
}

impl ExplorerConfig {
    /// Create a new config builder.
    pub fn builder() -> ExplorerConfigBuilder {
        ExplorerConfigBuilder::default()
    }

    /// Create a config with defaults for the given root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            show_hidden: false,
            preserve_metadata: true,
            drop_fallback: None,
            opener: None,
        }
    }

    /// Listing options derived from this config.
    pub fn listing_options(&self) -> ListingOptions {
        ListingOptions {
            show_hidden: self.show_hidden,
        }
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ExplorerConfig::builder()
            .root("/home/user")
            .show_hidden(true)
            .opener(Some("code".to_string()))
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert!(config.show_hidden);
        assert!(config.preserve_metadata);
        assert_eq!(config.opener.as_deref(), Some("code"));
    }

    #[test]
    fn test_builder_requires_root() {
        assert!(ExplorerConfig::builder().build().is_err());
        assert!(ExplorerConfig::builder().root("").build().is_err());
    }

    #[test]
    fn test_config_simple() {
        let config = ExplorerConfig::new("/data");
        assert!(!config.show_hidden);
        assert!(config.drop_fallback.is_none());
        assert!(!config.listing_options().show_hidden);
    }
}
