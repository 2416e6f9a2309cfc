//! Subcommand implementations.

pub mod list;
pub mod render;
pub mod tree;
pub mod url;

use anyhow::{Context, Result};
use mkge_core::{GlobLister, PickerConfig, SortedVersionTree, scan};

/// Scan the configured downloads directory.
pub fn scan_downloads(config: &PickerConfig) -> Result<SortedVersionTree> {
    scan(&GlobLister, &config.downloads_dir, config.on_invalid)
        .with_context(|| format!("Failed to scan {}", config.downloads_dir.display()))
}
