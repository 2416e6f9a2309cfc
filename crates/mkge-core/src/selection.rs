//! Cascading selection over a serialized tree.
//!
//! The selection is a path of indices into the tree. [`apply`] is the only
//! transition: choosing a key at one level points every lower level at its
//! first (most recent) child, and the runtime pick is reset to the first
//! bundled runtime of the chosen type. A [`Selection`] can only be obtained
//! from [`initial`] or [`apply`], so it always points at existing nodes of the
//! tree it was made from. Handing it to [`apply`] with another tree is
//! reported as [`SelectionError::ForeignSelection`].

use mkge_schema::{
    ARCHIVE_PREFIX, Keyed, RUNTIME_MARKER, RuntimeChoice, SerializedMajor, SerializedMinor,
    SerializedRevision, SerializedTree, SerializedType, position_of,
};
use std::fmt;

/// The levels a user can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelKind {
    /// Major version select.
    Major,
    /// Minor version select.
    Minor,
    /// Revision select.
    Revision,
    /// Release type select.
    Type,
    /// Bundled runtime select.
    Runtime,
}

impl fmt::Display for LevelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Revision => "revision",
            Self::Type => "type",
            Self::Runtime => "madkit",
        })
    }
}

/// Failures of a selection transition.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The tree has no archive to select.
    #[error("No version available")]
    EmptyTree,

    /// A level has no entries, so nothing below it can be selected.
    #[error("No {level} available under the current selection")]
    EmptyLevel {
        /// Level that turned out empty.
        level: LevelKind,
    },

    /// The requested key is not a child of the current selection.
    #[error("Unknown {level} '{key}'")]
    UnknownKey {
        /// Level the key was looked up in.
        level: LevelKind,
        /// Requested key.
        key: String,
    },

    /// The selection points past the nodes of the tree it was applied to.
    #[error("Selection does not belong to this version tree")]
    ForeignSelection,
}

/// Indices of the selected node at each level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    major: usize,
    minor: usize,
    revision: usize,
    release: usize,
    runtime: Option<usize>,
}

impl Selection {
    /// Index into the majors.
    pub fn major(&self) -> usize {
        self.major
    }

    /// Index into the selected major's minors.
    pub fn minor(&self) -> usize {
        self.minor
    }

    /// Index into the selected minor's revisions.
    pub fn revision(&self) -> usize {
        self.revision
    }

    /// Index into the selected revision's types.
    pub fn release(&self) -> usize {
        self.release
    }

    /// Index into the selected type's runtimes, `None` for "no runtime".
    pub fn runtime(&self) -> Option<usize> {
        self.runtime
    }
}

/// A user action on one of the selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Pick a major version.
    SelectMajor(String),
    /// Pick a minor version within the current major.
    SelectMinor(String),
    /// Pick a revision within the current minor.
    SelectRevision(String),
    /// Pick a release type within the current revision.
    SelectType(String),
    /// Pick a bundled runtime within the current type, or none.
    SelectRuntime(RuntimeChoice),
}

fn first(len: usize, level: LevelKind) -> Result<usize, SelectionError> {
    if len == 0 {
        Err(SelectionError::EmptyLevel { level })
    } else {
        Ok(0)
    }
}

fn find<C: Keyed>(children: &[C], key: &str, level: LevelKind) -> Result<usize, SelectionError> {
    position_of(children, key).ok_or_else(|| SelectionError::UnknownKey {
        level,
        key: key.to_string(),
    })
}

type SelectedNodes<'a> = (
    &'a SerializedMajor,
    &'a SerializedMinor,
    &'a SerializedRevision,
    &'a SerializedType,
);

fn resolve(tree: &SerializedTree, sel: Selection) -> Option<SelectedNodes<'_>> {
    let major = tree.majors.get(sel.major)?;
    let minor = major.children.get(sel.minor)?;
    let revision = minor.children.get(sel.revision)?;
    let release = revision.children.get(sel.release)?;
    if sel.runtime.is_some_and(|rt| rt >= release.children.len()) {
        return None;
    }
    Some((major, minor, revision, release))
}

fn below_type(release: &SerializedType) -> Option<usize> {
    (!release.children.is_empty()).then_some(0)
}

fn below_revision(revision: &SerializedRevision, sel: Selection, at: usize) -> Selection {
    let release = &revision.children[at];
    Selection {
        release: at,
        runtime: below_type(release),
        ..sel
    }
}

fn below_minor(
    minor: &SerializedMinor,
    sel: Selection,
    at: usize,
) -> Result<Selection, SelectionError> {
    let revision = &minor.children[at];
    let release = first(revision.children.len(), LevelKind::Type)?;
    Ok(below_revision(
        revision,
        Selection { revision: at, ..sel },
        release,
    ))
}

fn below_major(
    major: &SerializedMajor,
    sel: Selection,
    at: usize,
) -> Result<Selection, SelectionError> {
    let minor = &major.children[at];
    let revision = first(minor.children.len(), LevelKind::Revision)?;
    below_minor(minor, Selection { minor: at, ..sel }, revision)
}

fn below_root(tree: &SerializedTree, at: usize) -> Result<Selection, SelectionError> {
    let major = &tree.majors[at];
    let minor = first(major.children.len(), LevelKind::Minor)?;
    let sel = Selection {
        major: at,
        minor: 0,
        revision: 0,
        release: 0,
        runtime: None,
    };
    below_major(major, sel, minor)
}

/// The most-recent-everything selection shown right after load.
///
/// # Errors
///
/// [`SelectionError::EmptyTree`] when there is nothing to select, or
/// [`SelectionError::EmptyLevel`] for a malformed tree with an empty level.
pub fn initial(tree: &SerializedTree) -> Result<Selection, SelectionError> {
    if tree.is_empty() {
        return Err(SelectionError::EmptyTree);
    }
    below_root(tree, 0)
}

/// Apply one action to `sel`, cascading to every level below the changed one.
///
/// # Errors
///
/// [`SelectionError::UnknownKey`] if the key is not a child of the current
/// selection; the caller keeps its previous state.
/// [`SelectionError::ForeignSelection`] if `sel` was made from a different
/// tree and does not fit this one.
pub fn apply(
    tree: &SerializedTree,
    sel: Selection,
    action: &Action,
) -> Result<Selection, SelectionError> {
    let (major, minor, revision, release) =
        resolve(tree, sel).ok_or(SelectionError::ForeignSelection)?;

    match action {
        Action::SelectMajor(key) => below_root(tree, find(&tree.majors, key, LevelKind::Major)?),
        Action::SelectMinor(key) => {
            below_major(major, sel, find(&major.children, key, LevelKind::Minor)?)
        }
        Action::SelectRevision(key) => {
            below_minor(minor, sel, find(&minor.children, key, LevelKind::Revision)?)
        }
        Action::SelectType(key) => Ok(below_revision(
            revision,
            sel,
            find(&revision.children, key, LevelKind::Type)?,
        )),
        Action::SelectRuntime(RuntimeChoice::None) => Ok(Selection {
            runtime: None,
            ..sel
        }),
        Action::SelectRuntime(RuntimeChoice::Version(key)) => Ok(Selection {
            runtime: Some(find(&release.children, key, LevelKind::Runtime)?),
            ..sel
        }),
    }
}

/// The two independent archive options of the download form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Ask for the archive bundling the source code.
    pub include_source: bool,
    /// Ask for the zip bundling the documentation.
    pub include_docs: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            include_source: true,
            include_docs: true,
        }
    }
}

/// Keys of a resolved selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedKeys<'a> {
    /// Major key.
    pub major: &'a str,
    /// Minor key.
    pub minor: &'a str,
    /// Revision key.
    pub revision: &'a str,
    /// Release type key.
    pub release: &'a str,
    /// Runtime version, `None` for "no runtime".
    pub runtime: Option<&'a str>,
}

impl SelectedKeys<'_> {
    /// Download URL of the selected archive.
    ///
    /// `<base>mkge-<major>.<minor>/` then `WithMadKit/<stem>+madkit-<runtime>`
    /// or `WithoutMadKit/<stem>`, then `_withsrc` when sources are requested,
    /// then `_withdoc.zip` or `.jar`.
    pub fn download_url(&self, base_url: &str, options: DownloadOptions) -> String {
        let stem = format!(
            "{ARCHIVE_PREFIX}{}.{}.{}{}",
            self.major, self.minor, self.revision, self.release
        );
        let mut url = format!("{base_url}{ARCHIVE_PREFIX}{}.{}/", self.major, self.minor);
        match self.runtime {
            Some(runtime) => {
                url.push_str("WithMadKit/");
                url.push_str(&stem);
                url.push_str(RUNTIME_MARKER);
                url.push_str(runtime);
            }
            None => {
                url.push_str("WithoutMadKit/");
                url.push_str(&stem);
            }
        }
        if options.include_source {
            url.push_str("_withsrc");
        }
        if options.include_docs {
            url.push_str("_withdoc.zip");
        } else {
            url.push_str(".jar");
        }
        url
    }
}

/// Owns a serialized tree and the current selection within it.
#[derive(Debug, Clone)]
pub struct SelectionController {
    tree: SerializedTree,
    state: Selection,
}

impl SelectionController {
    /// Load `tree` and select the most recent archive.
    ///
    /// # Errors
    ///
    /// Fails like [`initial`].
    pub fn new(tree: SerializedTree) -> Result<Self, SelectionError> {
        let state = initial(&tree)?;
        Ok(Self { tree, state })
    }

    /// The tree being navigated.
    pub fn tree(&self) -> &SerializedTree {
        &self.tree
    }

    /// Current selection indices.
    pub fn state(&self) -> Selection {
        self.state
    }

    /// Apply `action`; on error the selection is unchanged.
    ///
    /// # Errors
    ///
    /// Fails like [`apply`].
    pub fn dispatch(&mut self, action: &Action) -> Result<(), SelectionError> {
        self.state = apply(&self.tree, self.state, action)?;
        Ok(())
    }

    /// Select a major version.
    ///
    /// # Errors
    ///
    /// [`SelectionError::UnknownKey`] if `key` is not a major version.
    pub fn select_major(&mut self, key: &str) -> Result<(), SelectionError> {
        self.dispatch(&Action::SelectMajor(key.to_string()))
    }

    /// Select a minor version of the current major.
    ///
    /// # Errors
    ///
    /// [`SelectionError::UnknownKey`] if `key` is not under the current major.
    pub fn select_minor(&mut self, key: &str) -> Result<(), SelectionError> {
        self.dispatch(&Action::SelectMinor(key.to_string()))
    }

    /// Select a revision of the current minor.
    ///
    /// # Errors
    ///
    /// [`SelectionError::UnknownKey`] if `key` is not under the current minor.
    pub fn select_revision(&mut self, key: &str) -> Result<(), SelectionError> {
        self.dispatch(&Action::SelectRevision(key.to_string()))
    }

    /// Select a release type of the current revision.
    ///
    /// # Errors
    ///
    /// [`SelectionError::UnknownKey`] if `key` is not under the current revision.
    pub fn select_type(&mut self, key: &str) -> Result<(), SelectionError> {
        self.dispatch(&Action::SelectType(key.to_string()))
    }

    /// Select a bundled runtime of the current type, or none.
    ///
    /// # Errors
    ///
    /// [`SelectionError::UnknownKey`] if the version is not under the current type.
    pub fn select_runtime(&mut self, choice: RuntimeChoice) -> Result<(), SelectionError> {
        self.dispatch(&Action::SelectRuntime(choice))
    }

    fn major_node(&self) -> &SerializedMajor {
        &self.tree.majors[self.state.major]
    }

    fn minor_node(&self) -> &SerializedMinor {
        &self.major_node().children[self.state.minor]
    }

    fn revision_node(&self) -> &SerializedRevision {
        &self.minor_node().children[self.state.revision]
    }

    fn type_node(&self) -> &SerializedType {
        &self.revision_node().children[self.state.release]
    }

    /// Options of the major select.
    pub fn majors(&self) -> &[SerializedMajor] {
        &self.tree.majors
    }

    /// Options of the minor select.
    pub fn minors(&self) -> &[SerializedMinor] {
        &self.major_node().children
    }

    /// Options of the revision select.
    pub fn revisions(&self) -> &[SerializedRevision] {
        &self.minor_node().children
    }

    /// Options of the type select.
    pub fn types(&self) -> &[SerializedType] {
        &self.revision_node().children
    }

    /// Runtime versions offered besides "none".
    pub fn runtimes(&self) -> &[String] {
        &self.type_node().children
    }

    /// Keys of the current selection.
    pub fn selected(&self) -> SelectedKeys<'_> {
        let release = self.type_node();
        SelectedKeys {
            major: &self.major_node().key,
            minor: &self.minor_node().key,
            revision: &self.revision_node().key,
            release: &release.key,
            runtime: self.state.runtime.map(|i| release.children[i].as_str()),
        }
    }

    /// Download URL for the current selection.
    pub fn download_url(&self, base_url: &str, options: DownloadOptions) -> String {
        self.selected().download_url(base_url, options)
    }
}
