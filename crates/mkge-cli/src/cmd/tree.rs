//! `tree` - dump the serialized version tree.

use anyhow::{Context, Result};
use mkge_core::PickerConfig;
use mkge_core::serializer::{serialize, to_json};

use super::scan_downloads;

/// Print the serialized version tree.
pub fn tree(config: &PickerConfig, pretty: bool) -> Result<()> {
    let tree = serialize(&scan_downloads(config)?);
    let json = to_json(&tree, pretty).context("Failed to encode version tree")?;
    println!("{json}");
    Ok(())
}
