//! Shared types for the MKGE download picker.
//!
//! The scanner produces [`ArchiveRecord`]s, the core library folds them into a
//! sorted version tree, and the tree is handed to the selection UI as a
//! [`SerializedTree`].

pub mod serialized;
pub mod types;

// Re-exports
pub use serialized::*;
pub use types::*;

/// Prefix shared by every archive file name and per-release directory.
pub const ARCHIVE_PREFIX: &str = "mkge-";

/// Separator between the release part of a file name and the bundled runtime version.
pub const RUNTIME_MARKER: &str = "+madkit-";
