//! Directory listing collaborators.
//!
//! Listing is best-effort: a failed or invalid listing yields no entries and a
//! warning, never an error, so a flaky host filesystem degrades to an empty
//! download page instead of a broken one.

use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Shell-style matching rules shared by every lister: `*` stays inside one
/// path component and never matches hidden entries.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Lists filesystem entries matching a glob pattern.
pub trait DirectoryLister {
    /// Return the entries matching `pattern`, sorted by path.
    ///
    /// With `only_directories`, regular files are left out.
    fn list(&self, pattern: &str, only_directories: bool) -> Vec<PathBuf>;
}

impl<T: DirectoryLister + ?Sized> DirectoryLister for &T {
    fn list(&self, pattern: &str, only_directories: bool) -> Vec<PathBuf> {
        (**self).list(pattern, only_directories)
    }
}

/// Build a pattern matching `tail` inside the literal directory `dir`.
///
/// Glob metacharacters in `dir` are escaped and trailing separators dropped.
pub fn pattern_in(dir: &Path, tail: &str) -> String {
    let normalized: PathBuf = dir.components().collect();
    let escaped = Pattern::escape(&normalized.to_string_lossy());
    PathBuf::from(escaped).join(tail).to_string_lossy().into_owned()
}

/// Lists entries from the real filesystem with the `glob` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobLister;

impl DirectoryLister for GlobLister {
    fn list(&self, pattern: &str, only_directories: bool) -> Vec<PathBuf> {
        let paths = match glob::glob_with(pattern, MATCH_OPTIONS) {
            Ok(paths) => paths,
            Err(e) => {
                warn!(pattern, error = %e, "invalid listing pattern");
                return Vec::new();
            }
        };

        let mut entries: Vec<PathBuf> = paths
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!(pattern, error = %e, "skipping unreadable entry");
                    None
                }
            })
            .filter(|path| !only_directories || path.is_dir())
            .collect();
        entries.sort();
        entries
    }
}

/// Fixed in-memory listing, for hosts where the tree is known up front.
#[derive(Debug, Default, Clone)]
pub struct StaticLister {
    entries: Vec<(PathBuf, bool)>,
}

impl StaticLister {
    /// Create an empty listing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory entry.
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.entries.push((path.into(), true));
        self
    }

    /// Add a file entry.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.entries.push((path.into(), false));
        self
    }
}

impl DirectoryLister for StaticLister {
    fn list(&self, pattern: &str, only_directories: bool) -> Vec<PathBuf> {
        let Ok(pattern) = Pattern::new(pattern) else {
            warn!(pattern, "invalid listing pattern");
            return Vec::new();
        };

        let mut entries: Vec<PathBuf> = self
            .entries
            .iter()
            .filter(|(path, is_dir)| {
                (!only_directories || *is_dir) && pattern.matches_path_with(path, MATCH_OPTIONS)
            })
            .map(|(path, _)| path.clone())
            .collect();
        entries.sort();
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_pattern_in_normalizes_and_escapes() {
        assert_eq!(pattern_in(Path::new("./downloads/"), "*"), "./downloads/*");
        assert_eq!(pattern_in(Path::new("/srv/[old]"), "*.jar"), "/srv/[[]old[]]/*.jar");
    }

    #[test]
    fn test_glob_lister_filters_directories() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("mkge-1.0")).unwrap();
        fs::create_dir(tmp.path().join(".hidden")).unwrap();
        fs::write(tmp.path().join("readme.txt"), "x").unwrap();

        let all = GlobLister.list(&pattern_in(tmp.path(), "*"), false);
        assert_eq!(all.len(), 2);

        let dirs = GlobLister.list(&pattern_in(tmp.path(), "*"), true);
        assert_eq!(dirs, vec![tmp.path().join("mkge-1.0")]);
    }

    #[test]
    fn test_glob_lister_missing_dir_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        assert!(GlobLister.list(&pattern_in(&missing, "*"), false).is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_empty() {
        assert!(GlobLister.list("[", false).is_empty());
        assert!(StaticLister::new().with_file("a").list("[", false).is_empty());
    }

    #[test]
    fn test_static_lister_stays_in_one_component() {
        let lister = StaticLister::new()
            .with_dir("root/mkge-1.0")
            .with_file("root/mkge-1.0/WithMadKit/a.jar")
            .with_file("root/notes.txt");

        assert_eq!(lister.list("root/*", true), vec![PathBuf::from("root/mkge-1.0")]);
        assert_eq!(lister.list("root/*", false).len(), 2);
        assert_eq!(
            lister.list("root/mkge-1.0/WithMadKit/*.jar", false),
            vec![PathBuf::from("root/mkge-1.0/WithMadKit/a.jar")]
        );
    }
}
