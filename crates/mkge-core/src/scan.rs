//! One-shot scan of the downloads directory into a sorted version tree.
//!
//! Layout:
//!
//! ```text
//! downloads/
//! ├── mkge-1.2/
//! │   ├── WithMadKit/     # mkge-1.2.3Stable+madkit-5.1.0.0.jar, ...
//! │   └── WithoutMadKit/
//! └── mkge-1.3/
//! ```

use mkge_schema::{ARCHIVE_PREFIX, ParseError};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::InvalidNamePolicy;
use crate::lister::{DirectoryLister, pattern_in};
use crate::parser::parse_path;
use crate::tree::{SortedVersionTree, VersionTree};

/// Sub-directory of each release directory holding runtime-bundled archives.
pub const WITH_RUNTIME_DIR: &str = "WithMadKit";

/// Errors aborting a scan.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// An archive name did not parse and the policy is [`InvalidNamePolicy::Abort`].
    #[error("{path}: {source}")]
    InvalidArchive {
        /// Offending archive.
        path: PathBuf,
        /// Why the name was rejected.
        source: ParseError,
    },
}

/// Release directories (`mkge-*`) directly under `downloads_dir`.
pub fn release_dirs<L: DirectoryLister + ?Sized>(lister: &L, downloads_dir: &Path) -> Vec<PathBuf> {
    lister
        .list(&pattern_in(downloads_dir, "*"), true)
        .into_iter()
        .filter(|dir| {
            dir.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(ARCHIVE_PREFIX))
        })
        .collect()
}

/// Scan `downloads_dir` and build the sorted index.
///
/// Listing failures count as empty directories. Malformed names either abort
/// the scan or are skipped with a warning, per `policy`.
///
/// # Errors
///
/// [`ScanError::InvalidArchive`] for the first malformed name under
/// [`InvalidNamePolicy::Abort`].
pub fn scan<L: DirectoryLister + ?Sized>(
    lister: &L,
    downloads_dir: &Path,
    policy: InvalidNamePolicy,
) -> Result<SortedVersionTree, ScanError> {
    let mut tree = VersionTree::new();
    let mut accepted = 0usize;
    let mut skipped = 0usize;

    for dir in release_dirs(lister, downloads_dir) {
        let archives = lister.list(&pattern_in(&dir.join(WITH_RUNTIME_DIR), "*.jar"), false);
        debug!(dir = %dir.display(), archives = archives.len(), "listing release directory");

        for path in archives {
            match parse_path(&path) {
                Ok(record) => {
                    debug!(archive = %record.archive_stem(), "indexed");
                    tree.insert(&record);
                    accepted += 1;
                }
                Err(source) => match policy {
                    InvalidNamePolicy::Abort => {
                        return Err(ScanError::InvalidArchive { path, source });
                    }
                    InvalidNamePolicy::Skip => {
                        warn!(path = %path.display(), error = %source, "skipping archive");
                        skipped += 1;
                    }
                },
            }
        }
    }

    info!(
        downloads_dir = %downloads_dir.display(),
        accepted,
        skipped,
        "scan complete"
    );
    Ok(tree.sort())
}
