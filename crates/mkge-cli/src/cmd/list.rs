//! `list` - table of indexed archives.

use anyhow::Result;
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use mkge_core::PickerConfig;

use super::scan_downloads;

/// List all indexed archives
pub fn list(config: &PickerConfig) -> Result<()> {
    let tree = scan_downloads(config)?;

    if tree.is_empty() {
        println!();
        println!("  No archives found in {}.", config.downloads_dir.display());
        return Ok(());
    }

    let records = tree.records();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Major", "Minor", "Revision", "Type", "MadKit", "Archive"]);

    for record in &records {
        table.add_row(vec![
            record.major.to_string(),
            record.minor.to_string(),
            record.revision.to_string(),
            record.release.to_string(),
            record.runtime.to_string(),
            record.archive_stem(),
        ]);
    }

    println!("{table}");
    println!("  {} archive(s)", records.len());
    Ok(())
}
