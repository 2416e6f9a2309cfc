//! Version index: Major → Minor → Revision → Type → runtime versions.
//!
//! Every level is the same generic [`Node`], so inserting, sorting and
//! serializing are written once. Keys are typed (`u32` for the numeric levels,
//! [`ReleaseType`] and [`RuntimeVersion`] below them) and each level orders
//! its children by the key's own [`Ord`], most recent first.
//!
//! Building follows a typestate: a [`VersionTree`] only grows, and
//! [`VersionTree::sort`] consumes it into a read-only [`SortedVersionTree`].

use mkge_schema::{ArchiveRecord, ReleaseType, RuntimeVersion};

/// A keyed entry at one level of the tree.
pub trait Level {
    /// Key identifying the entry among its siblings.
    type Key: Ord + Copy;

    /// This entry's key.
    fn key(&self) -> &Self::Key;

    /// Create a childless entry for `key`.
    fn vacant(key: Self::Key) -> Self;

    /// Order this entry's descendants, most recent first.
    fn sort_desc(&mut self);
}

/// A tree node: a key plus its children, unique by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<K, C> {
    key: K,
    children: Vec<C>,
}

impl<K, C: Level> Node<K, C> {
    /// This node's key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Children in their current order.
    pub fn children(&self) -> &[C] {
        &self.children
    }

    /// Child with `key`, created on first use.
    fn entry(&mut self, key: C::Key) -> &mut C {
        if let Some(idx) = self.children.iter().position(|c| *c.key() == key) {
            return &mut self.children[idx];
        }
        self.children.push(C::vacant(key));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }
}

impl<K: Ord + Copy, C: Level> Level for Node<K, C> {
    type Key = K;

    fn key(&self) -> &K {
        &self.key
    }

    fn vacant(key: K) -> Self {
        Self {
            key,
            children: Vec::new(),
        }
    }

    fn sort_desc(&mut self) {
        self.children.sort_by(|a, b| b.key().cmp(a.key()));
        for child in &mut self.children {
            child.sort_desc();
        }
    }
}

impl Level for RuntimeVersion {
    type Key = RuntimeVersion;

    fn key(&self) -> &RuntimeVersion {
        self
    }

    fn vacant(key: RuntimeVersion) -> Self {
        key
    }

    fn sort_desc(&mut self) {}
}

/// Release type node holding the set of bundled runtime versions.
pub type TypeNode = Node<ReleaseType, RuntimeVersion>;
/// Revision node.
pub type RevisionNode = Node<u32, TypeNode>;
/// Minor version node.
pub type MinorNode = Node<u32, RevisionNode>;
/// Major version node.
pub type MajorNode = Node<u32, MinorNode>;

type Root = Node<(), MajorNode>;

/// Index under construction. Accepts inserts in any order.
#[derive(Debug, Clone)]
pub struct VersionTree {
    root: Root,
}

impl Default for VersionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionTree {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            root: Root::vacant(()),
        }
    }

    /// Add one archive, creating missing levels on demand.
    ///
    /// Inserting a combination that already exists reuses its nodes, and a
    /// runtime version already present under the same type is not repeated.
    pub fn insert(&mut self, record: &ArchiveRecord) {
        self.root
            .entry(record.major)
            .entry(record.minor)
            .entry(record.revision)
            .entry(record.release)
            .entry(record.runtime);
    }

    /// True if nothing was inserted.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Order every level most recent first and freeze the index.
    pub fn sort(mut self) -> SortedVersionTree {
        self.root.sort_desc();
        SortedVersionTree { root: self.root }
    }
}

impl Extend<ArchiveRecord> for VersionTree {
    fn extend<I: IntoIterator<Item = ArchiveRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(&record);
        }
    }
}

impl FromIterator<ArchiveRecord> for VersionTree {
    fn from_iter<I: IntoIterator<Item = ArchiveRecord>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

/// Sorted, read-only index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedVersionTree {
    root: Root,
}

impl SortedVersionTree {
    /// True if no archive was indexed.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Major versions, most recent first.
    pub fn majors(&self) -> &[MajorNode] {
        &self.root.children
    }

    /// Every indexed archive in tree order.
    pub fn records(&self) -> Vec<ArchiveRecord> {
        let mut out = Vec::new();
        for major in self.majors() {
            for minor in major.children() {
                for revision in minor.children() {
                    for release in revision.children() {
                        out.extend(release.children().iter().map(|&runtime| ArchiveRecord {
                            major: major.key,
                            minor: minor.key,
                            revision: revision.key,
                            release: release.key,
                            runtime,
                        }));
                    }
                }
            }
        }
        out
    }
}
