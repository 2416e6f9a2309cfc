//! Wire format of the version tree consumed by the selection UI.
//!
//! Every level shares one generic node shape, `{ "key": ..., "children": [...] }`.
//! Children are kept in the exact order the sorted tree produced them, so the
//! first child at every level is the most recent one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Option value the page uses for "Do not include `MadKit`".
pub const NO_RUNTIME_VALUE: &str = "nomadkit";

/// One level of the serialized tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedNode<C> {
    /// Display form of this level's key (`"1"`, `"Beta2"`, ...).
    pub key: String,
    /// Children in most-recent-first order.
    pub children: Vec<C>,
}

/// Release type node; its children are runtime version strings.
pub type SerializedType = SerializedNode<String>;
/// Revision node.
pub type SerializedRevision = SerializedNode<SerializedType>;
/// Minor version node.
pub type SerializedMinor = SerializedNode<SerializedRevision>;
/// Major version node.
pub type SerializedMajor = SerializedNode<SerializedMinor>;

/// The whole serialized version index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedTree {
    /// Major versions, most recent first.
    pub majors: Vec<SerializedMajor>,
}

impl SerializedTree {
    /// True when no archive was indexed.
    pub fn is_empty(&self) -> bool {
        self.majors.is_empty()
    }
}

/// Anything addressable by a string key inside a serialized level.
pub trait Keyed {
    /// The key the UI uses as option value.
    fn key(&self) -> &str;
}

impl<C> Keyed for SerializedNode<C> {
    fn key(&self) -> &str {
        &self.key
    }
}

impl Keyed for String {
    fn key(&self) -> &str {
        self
    }
}

/// Index of the child carrying `key`, if any.
pub fn position_of<C: Keyed>(children: &[C], key: &str) -> Option<usize> {
    children.iter().position(|c| c.key() == key)
}

/// Runtime-version choice made in the `madkit` select.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeChoice {
    /// Download the archive without a bundled runtime.
    None,
    /// Download the archive bundling this runtime version.
    Version(String),
}

impl RuntimeChoice {
    /// The runtime version, unless "none" was picked.
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Version(v) => Some(v),
        }
    }
}

impl fmt::Display for RuntimeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Version(v) => f.write_str(v),
        }
    }
}

impl FromStr for RuntimeChoice {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.eq_ignore_ascii_case("none") || s == NO_RUNTIME_VALUE {
            Self::None
        } else {
            Self::Version(s.to_string())
        })
    }
}
