//! Full-tree validation and error-tree merging.
//!
//! [`validate_tree`] walks the data and validator trees together and
//! produces an error tree mirroring their shape. It is used on load,
//! external data replacement, and submission; incremental single-field
//! validation lives in the engine and must agree with it position by
//! position.

use indexmap::IndexMap;

use crate::error::TreeError;
use crate::path::FieldPath;
use crate::tree::{DataTree, ErrorTree, Node};
use crate::validator::ValidatorTree;

/// Validates an entire data tree against a validator tree.
///
/// The walk is driven by the validator tree: every registered entry runs,
/// whether or not the data provides a value (a missing value validates as
/// the empty string). The result mirrors the validated shape:
///
/// - keyed nodes contain one child per *validated* key; data keys with no
///   validator are omitted entirely,
/// - list nodes keep every position, with `Leaf(None)` placeholders where
///   no validator child exists, so indices stay aligned,
/// - leaf entries record `Leaf(None)` on pass and `Leaf(message)` on
///   failure.
///
/// A data node whose kind disagrees with the validator tree's kind at the
/// same position is a configuration defect and fails fast; an absent or
/// null data node under an internal validator node is fine and is walked
/// as if empty.
pub fn validate_tree(data: &DataTree, spec: &ValidatorTree) -> Result<ErrorTree, TreeError> {
    walk(Some(data), spec, &FieldPath::root())
}

fn walk(
    data: Option<&DataTree>,
    spec: &ValidatorTree,
    path: &FieldPath,
) -> Result<ErrorTree, TreeError> {
    match spec {
        Node::Leaf(entry) => {
            let value = match data {
                None | Some(Node::Leaf(None)) => "",
                Some(Node::Leaf(Some(s))) => s.as_str(),
                Some(other) => {
                    return Err(TreeError::shape_mismatch(path.clone(), "leaf", other.kind()))
                }
            };
            Ok(Node::Leaf(entry.validate(value)))
        }
        Node::Keyed(fields) => {
            let children = match data {
                None | Some(Node::Leaf(None)) => None,
                Some(Node::Keyed(map)) => Some(map),
                Some(other) => {
                    return Err(TreeError::shape_mismatch(path.clone(), "keyed", other.kind()))
                }
            };

            let mut result = IndexMap::with_capacity(fields.len());
            for (key, child_spec) in fields {
                let child_path = path.push_key(key);
                let child_data = children.and_then(|map| map.get(key));
                result.insert(key.clone(), walk(child_data, child_spec, &child_path)?);
            }
            Ok(Node::Keyed(result))
        }
        Node::List(child_specs) => {
            let items: &[DataTree] = match data {
                None | Some(Node::Leaf(None)) => &[],
                Some(Node::List(items)) => items.as_slice(),
                Some(other) => {
                    return Err(TreeError::shape_mismatch(path.clone(), "list", other.kind()))
                }
            };

            let len = items.len().max(child_specs.len());
            let mut result = Vec::with_capacity(len);
            for index in 0..len {
                let child_path = path.push_index(index);
                match child_specs.get(index) {
                    Some(child_spec) => {
                        result.push(walk(items.get(index), child_spec, &child_path)?);
                    }
                    // data position with no validator: hold its place
                    None => result.push(Node::Leaf(None)),
                }
            }
            Ok(Node::List(result))
        }
    }
}

/// Merges a freshly computed error tree over a previous one.
///
/// The fresh tree wins at every position it defines; branches only present
/// in the previous tree are carried over unchanged. Used when external data
/// replaces the engine's, so error state for branches the new validation
/// did not cover keeps its shape.
pub fn merge_errors(previous: &ErrorTree, fresh: &ErrorTree) -> ErrorTree {
    match (previous, fresh) {
        (Node::Keyed(old), Node::Keyed(new)) => {
            let mut result = old.clone();
            for (key, fresh_child) in new {
                let merged = match old.get(key) {
                    Some(old_child) => merge_errors(old_child, fresh_child),
                    None => fresh_child.clone(),
                };
                result.insert(key.clone(), merged);
            }
            Node::Keyed(result)
        }
        (Node::List(old), Node::List(new)) => {
            let mut result: Vec<ErrorTree> = new
                .iter()
                .enumerate()
                .map(|(index, fresh_child)| match old.get(index) {
                    Some(old_child) => merge_errors(old_child, fresh_child),
                    None => fresh_child.clone(),
                })
                .collect();
            if old.len() > new.len() {
                result.extend(old[new.len()..].iter().cloned());
            }
            Node::List(result)
        }
        (_, fresh) => fresh.clone(),
    }
}
