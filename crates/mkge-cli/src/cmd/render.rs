//! `render` - write the HTML download page.

use anyhow::{Context, Result};
use mkge_core::PickerConfig;
use mkge_core::page::{self, PageOptions};
use mkge_core::serializer::serialize;
use std::path::Path;

use super::scan_downloads;

/// Render the download page to `output`, or stdout.
pub fn render(config: &PickerConfig, output: Option<&Path>) -> Result<()> {
    let tree = serialize(&scan_downloads(config)?);
    let html = page::render(
        &tree,
        &PageOptions {
            title: &config.title,
            base_url: &config.base_url,
        },
    )
    .context("Failed to render download page")?;

    match output {
        Some(path) => {
            std::fs::write(path, html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "page written");
        }
        None => print!("{html}"),
    }
    Ok(())
}
