//! The recursive tree shared by form data, validators, and errors.
//!
//! This module provides the [`Node`] tagged union and the path-indexed
//! lens ([`Node::get`] / [`Node::set`]) used for all reads and
//! copy-on-write updates. Data and error trees are both [`Node`]s with
//! `Option<String>` leaves; the validator tree reuses the same shape with
//! validator entries at its leaves.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::TreeError;
use crate::path::{FieldPath, PathSegment};

/// A node in a nested form tree.
///
/// Every tree the engine works with is built from the same three shapes:
/// a leaf value, a positional list of subtrees, or a keyed mapping of
/// subtrees. Keyed nodes preserve insertion order so traversal and
/// serialization are deterministic.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<T> {
    /// A leaf value.
    Leaf(T),
    /// An ordered list of sibling subtrees, addressed by position.
    List(Vec<Node<T>>),
    /// A mapping from string key to subtree, addressed by key.
    Keyed(IndexMap<String, Node<T>>),
}

/// The nested form data: leaves are the raw string value or absent.
pub type DataTree = Node<Option<String>>;

/// The nested error record mirroring the data tree: leaves are `None`
/// (no error) or a single error message.
pub type ErrorTree = Node<Option<String>>;

impl<T> Default for Node<T> {
    /// An empty keyed mapping, the shape of a blank form.
    fn default() -> Self {
        Node::Keyed(IndexMap::new())
    }
}

impl<T> Node<T> {
    /// The kind of this node, for shape-mismatch reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Leaf(_) => "leaf",
            Node::List(_) => "list",
            Node::Keyed(_) => "keyed",
        }
    }

    /// Reads the node at `path`, or `None` if any step of the descent
    /// finds a missing key, an out-of-range index, or a node whose kind
    /// does not admit the next segment.
    ///
    /// The empty path returns the node itself.
    pub fn get(&self, path: &FieldPath) -> Option<&Node<T>> {
        let mut node = self;
        for segment in path.segments() {
            node = match (node, segment) {
                (Node::Keyed(map), PathSegment::Key(key)) => map.get(key)?,
                (Node::List(items), PathSegment::Index(index)) => items.get(*index)?,
                _ => return None,
            };
        }
        Some(node)
    }
}

impl<T: Clone + Default + PartialEq> Node<T> {
    /// Returns a new tree identical to this one except that the node at
    /// `path` is replaced by `replacement`.
    ///
    /// Ancestors along the path are rebuilt; all other branches are cloned
    /// unchanged, so `get` at any path not sharing `path` as a prefix is
    /// unaffected. The empty path returns the replacement itself.
    ///
    /// Missing intermediate nodes are created on the way down: a `Key`
    /// segment creates an empty keyed mapping, an `Index` segment creates
    /// (or pads) a list with default leaves up to the index. A leaf holding
    /// the default value is treated as vacant and may be grown into. Any
    /// other kind disagreement is a [`TreeError::ShapeMismatch`].
    pub fn set(&self, path: &FieldPath, replacement: Node<T>) -> Result<Node<T>, TreeError> {
        set_at(Some(self), path.as_slice(), replacement, path, 0)
    }
}

fn set_at<T: Clone + Default + PartialEq>(
    node: Option<&Node<T>>,
    segments: &[PathSegment],
    replacement: Node<T>,
    full_path: &FieldPath,
    depth: usize,
) -> Result<Node<T>, TreeError> {
    let Some((segment, rest)) = segments.split_first() else {
        return Ok(replacement);
    };

    match segment {
        PathSegment::Key(key) => {
            let mut map = match node {
                None => IndexMap::new(),
                Some(Node::Keyed(map)) => map.clone(),
                Some(Node::Leaf(value)) if *value == T::default() => IndexMap::new(),
                Some(other) => {
                    return Err(TreeError::shape_mismatch(
                        full_path.prefix(depth),
                        segment.expects(),
                        other.kind(),
                    ))
                }
            };
            let child = set_at(map.get(key), rest, replacement, full_path, depth + 1)?;
            map.insert(key.clone(), child);
            Ok(Node::Keyed(map))
        }
        PathSegment::Index(index) => {
            let mut items = match node {
                None => Vec::new(),
                Some(Node::List(items)) => items.clone(),
                Some(Node::Leaf(value)) if *value == T::default() => Vec::new(),
                Some(other) => {
                    return Err(TreeError::shape_mismatch(
                        full_path.prefix(depth),
                        segment.expects(),
                        other.kind(),
                    ))
                }
            };
            while items.len() <= *index {
                items.push(Node::Leaf(T::default()));
            }
            let child = set_at(Some(&items[*index]), rest, replacement, full_path, depth + 1)?;
            items[*index] = child;
            Ok(Node::List(items))
        }
    }
}

impl Node<Option<String>> {
    /// Builds a data (or error) tree from a `serde_json::Value`.
    ///
    /// Null becomes an absent leaf, strings become string leaves, arrays
    /// and objects become lists and keyed mappings. Numbers and booleans
    /// are carried as their string rendering, since field values enter the
    /// engine as raw strings.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Node::Leaf(None),
            Value::String(s) => Node::Leaf(Some(s.clone())),
            Value::Array(items) => Node::List(items.iter().map(Self::from_value).collect()),
            Value::Object(map) => Node::Keyed(
                map.iter()
                    .map(|(key, child)| (key.clone(), Self::from_value(child)))
                    .collect(),
            ),
            other => Node::Leaf(Some(other.to_string())),
        }
    }

    /// Renders this tree as a `serde_json::Value` for the host layer.
    pub fn to_value(&self) -> Value {
        match self {
            Node::Leaf(None) => Value::Null,
            Node::Leaf(Some(s)) => Value::String(s.clone()),
            Node::List(items) => Value::Array(items.iter().map(Self::to_value).collect()),
            Node::Keyed(map) => Value::Object(
                map.iter()
                    .map(|(key, child)| (key.clone(), child.to_value()))
                    .collect(),
            ),
        }
    }

    /// The leaf string at `path`, if the path lands on a populated leaf.
    pub fn leaf_str(&self, path: &FieldPath) -> Option<&str> {
        match self.get(path) {
            Some(Node::Leaf(Some(s))) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<&Value> for Node<Option<String>> {
    fn from(value: &Value) -> Self {
        Node::from_value(value)
    }
}
