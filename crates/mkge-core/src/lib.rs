//! Core library for the MKGE download picker.
//!
//! # Pipeline
//!
//! ```text
//! DirectoryLister ─▶ parser ─▶ VersionTree ─▶ sort() ─▶ serializer ─▶ SelectionController
//! ```
//!
//! - **Typestate**: [`tree::VersionTree`] only accepts inserts; sorting consumes
//!   it and yields a read-only [`tree::SortedVersionTree`].
//! - **Pure transitions**: the cascading selects are modelled by
//!   [`selection::apply`], a `(state, action) -> state` function with no UI.

pub mod config;
pub mod lister;
pub mod page;
pub mod parser;
pub mod scan;
pub mod selection;
pub mod serializer;
pub mod tree;

pub use config::{InvalidNamePolicy, PickerConfig};
pub use lister::{DirectoryLister, GlobLister};
pub use scan::{ScanError, scan};
pub use selection::{Action, DownloadOptions, SelectionController, SelectionError};
pub use tree::{SortedVersionTree, VersionTree};

/// Default location of the published archives.
pub const DEFAULT_DOWNLOADS_DIR: &str = "./downloads/";

/// Default public URL the download directory is served from.
pub const DEFAULT_BASE_URL: &str = "http://madkitgroupextension.free.fr/downloads/";
