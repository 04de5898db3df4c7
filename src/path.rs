//! Field path representation for locating nodes in nested form trees.
//!
//! This module provides [`FieldPath`] and [`PathSegment`] types for building
//! and representing paths into the nested data, validator, and error trees.

use std::fmt::{self, Display};
use std::str::FromStr;

/// A segment of a field path.
///
/// Paths are built from segments that represent either keyed access into a
/// mapping or positional access into a list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A key into a keyed mapping (e.g., `address`, `email`)
    Key(String),
    /// A positional index into a list (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new key segment.
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment::Key(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }

    /// The kind of node this segment expects to descend into.
    pub(crate) fn expects(&self) -> &'static str {
        match self {
            PathSegment::Key(_) => "keyed",
            PathSegment::Index(_) => "list",
        }
    }
}

/// A path to a node in a nested form tree.
///
/// `FieldPath` represents locations like `contacts[0].email` and provides
/// methods for building paths incrementally. An empty path addresses the
/// root of the tree.
///
/// # Example
///
/// ```rust
/// use intake::FieldPath;
///
/// let path = FieldPath::root()
///     .push_key("contacts")
///     .push_index(0)
///     .push_key("email");
///
/// assert_eq!(path.to_string(), "contacts[0].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates an empty path addressing the root of a tree.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single key segment.
    pub fn key(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Key(name.into())],
        }
    }

    /// Creates a path from a sequence of key segments.
    ///
    /// # Example
    ///
    /// ```rust
    /// use intake::FieldPath;
    ///
    /// let path = FieldPath::keys(["address", "zip"]);
    /// assert_eq!(path.to_string(), "address.zip");
    /// ```
    pub fn keys<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: names
                .into_iter()
                .map(|n| PathSegment::Key(n.into()))
                .collect(),
        }
    }

    /// Returns a new path with a key segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push_key(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the segments as a slice.
    pub fn as_slice(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the parent path (all segments except the last), or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Returns the first `len` segments as a new path.
    ///
    /// Used to report where along a path a shape mismatch was found.
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            segments: self.segments[..len.min(self.segments.len())].to_vec(),
        }
    }

    /// Returns true if `other` starts with all of this path's segments.
    pub fn is_prefix_of(&self, other: &FieldPath) -> bool {
        other.segments.len() >= self.segments.len()
            && other.segments[..self.segments.len()] == self.segments[..]
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

/// Errors produced when parsing a [`FieldPath`] from its display form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathParseError {
    /// A key segment between dots was empty (e.g. `a..b`).
    #[error("empty key segment in path '{0}'")]
    EmptyKey(String),

    /// An index segment was missing its closing bracket.
    #[error("unterminated index segment in path '{0}'")]
    UnterminatedIndex(String),

    /// An index segment did not contain a valid non-negative integer.
    #[error("invalid index '{0}' in path '{1}'")]
    InvalidIndex(String, String),
}

impl FromStr for FieldPath {
    type Err = PathParseError;

    /// Parses the dotted/bracketed form produced by `Display`, e.g.
    /// `contacts[0].email`. The empty string parses to the root path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = Vec::new();
        let mut rest = s;

        while !rest.is_empty() {
            if let Some(after_dot) = rest.strip_prefix('.') {
                let end = after_dot.find(['.', '[']).unwrap_or(after_dot.len());
                if end == 0 {
                    return Err(PathParseError::EmptyKey(s.to_string()));
                }
                segments.push(PathSegment::Key(after_dot[..end].to_string()));
                rest = &after_dot[end..];
            } else if let Some(after_bracket) = rest.strip_prefix('[') {
                let close = after_bracket
                    .find(']')
                    .ok_or_else(|| PathParseError::UnterminatedIndex(s.to_string()))?;
                let raw = &after_bracket[..close];
                let index: usize = raw
                    .parse()
                    .map_err(|_| PathParseError::InvalidIndex(raw.to_string(), s.to_string()))?;
                segments.push(PathSegment::Index(index));
                rest = &after_bracket[close + 1..];
            } else {
                let end = rest.find(['.', '[']).unwrap_or(rest.len());
                if end == 0 {
                    return Err(PathParseError::EmptyKey(s.to_string()));
                }
                segments.push(PathSegment::Key(rest[..end].to_string()));
                rest = &rest[end..];
            }
        }

        Ok(Self { segments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_is_empty() {
        let path = FieldPath::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_single_key() {
        let path = FieldPath::root().push_key("email");
        assert_eq!(path.to_string(), "email");
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_single_index() {
        let path = FieldPath::root().push_index(0);
        assert_eq!(path.to_string(), "[0]");
    }

    #[test]
    fn test_nested_keys() {
        let path = FieldPath::root().push_key("address").push_key("zip");
        assert_eq!(path.to_string(), "address.zip");
    }

    #[test]
    fn test_key_with_index() {
        let path = FieldPath::root().push_key("contacts").push_index(0);
        assert_eq!(path.to_string(), "contacts[0]");
    }

    #[test]
    fn test_complex_path() {
        let path = FieldPath::root()
            .push_key("contacts")
            .push_index(0)
            .push_key("email");
        assert_eq!(path.to_string(), "contacts[0].email");
    }

    #[test]
    fn test_path_immutability() {
        let base = FieldPath::root().push_key("contacts");
        let path_a = base.push_index(0);
        let path_b = base.push_index(1);

        assert_eq!(base.to_string(), "contacts");
        assert_eq!(path_a.to_string(), "contacts[0]");
        assert_eq!(path_b.to_string(), "contacts[1]");
    }

    #[test]
    fn test_parent_path() {
        let path = FieldPath::root()
            .push_key("contacts")
            .push_index(0)
            .push_key("email");

        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "contacts[0]");

        let grandparent = parent.parent().unwrap();
        assert_eq!(grandparent.to_string(), "contacts");

        let root = grandparent.parent().unwrap();
        assert!(root.is_root());

        assert!(root.parent().is_none());
    }

    #[test]
    fn test_keys_constructor() {
        let path = FieldPath::keys(["address", "zip"]);
        assert_eq!(path.to_string(), "address.zip");
        assert_eq!(path, FieldPath::root().push_key("address").push_key("zip"));
    }

    #[test]
    fn test_last_segment() {
        let path = FieldPath::root().push_key("contacts").push_index(0);
        assert_eq!(path.last(), Some(&PathSegment::Index(0)));

        let root = FieldPath::root();
        assert_eq!(root.last(), None);
    }

    #[test]
    fn test_prefix() {
        let path = FieldPath::root().push_key("a").push_index(1).push_key("b");

        assert_eq!(path.prefix(0), FieldPath::root());
        assert_eq!(path.prefix(2).to_string(), "a[1]");
        assert_eq!(path.prefix(99), path);
    }

    #[test]
    fn test_is_prefix_of() {
        let base = FieldPath::key("address");
        let deeper = FieldPath::keys(["address", "zip"]);
        let other = FieldPath::key("email");

        assert!(base.is_prefix_of(&deeper));
        assert!(base.is_prefix_of(&base));
        assert!(!deeper.is_prefix_of(&base));
        assert!(!base.is_prefix_of(&other));
        assert!(FieldPath::root().is_prefix_of(&other));
    }

    #[test]
    fn test_equality() {
        let path1 = FieldPath::root().push_key("a").push_index(0);
        let path2 = FieldPath::root().push_key("a").push_index(0);
        let path3 = FieldPath::root().push_key("a").push_index(1);

        assert_eq!(path1, path2);
        assert_ne!(path1, path3);
    }

    #[test]
    fn test_parse_round_trip() {
        for text in ["", "email", "address.zip", "contacts[0].email", "[3]", "a[0][1].b"] {
            let path: FieldPath = text.parse().unwrap();
            assert_eq!(path.to_string(), text);
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "a..b".parse::<FieldPath>(),
            Err(PathParseError::EmptyKey("a..b".to_string()))
        );
        assert_eq!(
            "a[0".parse::<FieldPath>(),
            Err(PathParseError::UnterminatedIndex("a[0".to_string()))
        );
        assert_eq!(
            "a[x]".parse::<FieldPath>(),
            Err(PathParseError::InvalidIndex(
                "x".to_string(),
                "a[x]".to_string()
            ))
        );
    }
}
