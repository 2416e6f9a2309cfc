//! `url` - resolve a selection to its download URL.

use anyhow::{Context, Result};
use mkge_core::PickerConfig;
use mkge_core::selection::{DownloadOptions, SelectionController};
use mkge_core::serializer::serialize;
use mkge_schema::RuntimeChoice;

use super::scan_downloads;
use crate::UrlArgs;

/// Replay `args` through the selection cascade and print the resulting URL.
///
/// Levels are applied top-down, so each pick resets the ones below it before
/// the next level's flag is applied.
pub fn url(config: &PickerConfig, args: &UrlArgs) -> Result<()> {
    let tree = serialize(&scan_downloads(config)?);
    let mut ctl = SelectionController::new(tree)
        .with_context(|| format!("Nothing to download in {}", config.downloads_dir.display()))?;

    if let Some(key) = &args.major {
        ctl.select_major(key)?;
    }
    if let Some(key) = &args.minor {
        ctl.select_minor(key)?;
    }
    if let Some(key) = &args.revision {
        ctl.select_revision(key)?;
    }
    if let Some(key) = &args.release {
        ctl.select_type(key)?;
    }
    if let Some(raw) = &args.madkit {
        let Ok(choice) = raw.parse::<RuntimeChoice>();
        ctl.select_runtime(choice)?;
    }

    let options = DownloadOptions {
        include_source: !args.no_src,
        include_docs: !args.no_doc,
    };
    println!("{}", ctl.download_url(&config.base_url, options));
    Ok(())
}
