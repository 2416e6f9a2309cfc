//! Converts a sorted tree into the UI wire format.

use mkge_schema::{SerializedNode, SerializedTree};
use std::fmt::Display;

use crate::tree::{Level, Node, SortedVersionTree};

fn serialize_node<K, C, O>(node: &Node<K, C>, child: impl Fn(&C) -> O) -> SerializedNode<O>
where
    K: Display,
    C: Level,
{
    SerializedNode {
        key: node.key().to_string(),
        children: node.children().iter().map(child).collect(),
    }
}

/// Mirror `tree` level by level, preserving its order exactly.
pub fn serialize(tree: &SortedVersionTree) -> SerializedTree {
    let majors = tree
        .majors()
        .iter()
        .map(|major| {
            serialize_node(major, |minor| {
                serialize_node(minor, |revision| {
                    serialize_node(revision, |release| {
                        serialize_node(release, ToString::to_string)
                    })
                })
            })
        })
        .collect();
    SerializedTree { majors }
}

/// Serialize `tree` as JSON.
///
/// # Errors
///
/// Propagates `serde_json` failures.
pub fn to_json(tree: &SerializedTree, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(tree)
    } else {
        serde_json::to_string(tree)
    }
}
