//! Picker configuration, read from an optional `picker.toml`.
//!
//! ```toml
//! downloads_dir = "/var/www/downloads"
//! base_url = "https://example.org/downloads/"
//! title = "MadKitGroupExtension downloads"
//! on_invalid = "skip"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{DEFAULT_BASE_URL, DEFAULT_DOWNLOADS_DIR};

/// What a scan does with an archive whose name cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidNamePolicy {
    /// Fail the whole scan on the first malformed name.
    #[default]
    Abort,
    /// Log a warning and leave the archive out of the index.
    Skip,
}

/// Errors loading a configuration file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not valid configuration TOML.
    #[error("Invalid config {path}: {source}")]
    Toml {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: toml::de::Error,
    },
}

/// Settings shared by every picker command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PickerConfig {
    /// Directory holding the `mkge-*` release directories.
    pub downloads_dir: PathBuf,
    /// Public URL `downloads_dir` is served from.
    pub base_url: String,
    /// Page title and heading.
    pub title: String,
    /// Handling of malformed archive names.
    pub on_invalid: InvalidNamePolicy,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            downloads_dir: PathBuf::from(DEFAULT_DOWNLOADS_DIR),
            base_url: DEFAULT_BASE_URL.to_string(),
            title: "MadKitGroupExtension downloads".to_string(),
            on_invalid: InvalidNamePolicy::Abort,
        }
    }
}

impl PickerConfig {
    /// Load a configuration file; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, [`ConfigError::Toml`]
    /// if it does not decode.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.normalized())
    }

    /// Ensure `base_url` ends with a slash so paths can be appended to it.
    pub fn normalized(mut self) -> Self {
        if !self.base_url.is_empty() && !self.base_url.ends_with('/') {
            self.base_url.push('/');
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PickerConfig::default();
        assert_eq!(config.downloads_dir, PathBuf::from("./downloads/"));
        assert_eq!(config.base_url, "http://madkitgroupextension.free.fr/downloads/");
        assert_eq!(config.on_invalid, InvalidNamePolicy::Abort);
    }

    #[test]
    fn test_load_partial_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("picker.toml");
        std::fs::write(
            &path,
            "base_url = \"https://mirror.example/dl\"\non_invalid = \"skip\"\n",
        )
        .unwrap();

        let config = PickerConfig::load(&path).unwrap();
        assert_eq!(config.base_url, "https://mirror.example/dl/");
        assert_eq!(config.on_invalid, InvalidNamePolicy::Skip);
        assert_eq!(config.title, PickerConfig::default().title);
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("picker.toml");
        std::fs::write(&path, "downloads = \"x\"\n").unwrap();
        assert!(matches!(
            PickerConfig::load(&path),
            Err(ConfigError::Toml { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            PickerConfig::load(&tmp.path().join("absent.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
