//! Validator entries, the validator tree, and single-field validation.
//!
//! A validator is a plain synchronous function from a raw string value to
//! an optional error message. Fields carry either one validator or an
//! ordered chain; the chain runs every validator and surfaces the first
//! non-empty message.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::TreeError;
use crate::path::{FieldPath, PathSegment};
use crate::tree::Node;

/// A single field validator.
///
/// Returns `Some(message)` with a non-empty message to reject the value;
/// `None` (or an empty message) accepts it. Validators must be pure and
/// synchronous; anything that blocks or suspends must be wrapped by the
/// host before registration.
pub type ValidatorFn = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// The validation rule(s) attached to one field.
///
/// The two arrangements are explicit variants rather than runtime shape
/// sniffing: one validator, or a non-empty ordered chain.
#[derive(Clone)]
pub enum ValidatorEntry {
    /// A single validator function.
    Single(ValidatorFn),
    /// An ordered, non-empty chain of validator functions.
    Chain(Vec<ValidatorFn>),
}

impl ValidatorEntry {
    /// Creates an entry holding a single validator.
    pub fn single(validator: ValidatorFn) -> Self {
        ValidatorEntry::Single(validator)
    }

    /// Creates an entry holding an ordered chain of validators.
    ///
    /// # Panics
    ///
    /// Panics if `validators` is empty; an empty chain has no meaning and
    /// is always a construction bug.
    pub fn chain(validators: Vec<ValidatorFn>) -> Self {
        assert!(
            !validators.is_empty(),
            "a validator chain requires at least one validator"
        );
        ValidatorEntry::Chain(validators)
    }

    /// Validates a raw string value against this entry.
    ///
    /// For a single validator the message is returned verbatim. For a
    /// chain, every validator runs in order (no short-circuiting), all
    /// messages are collected, and only the first is surfaced. An empty
    /// message counts as a pass either way.
    pub fn validate(&self, value: &str) -> Option<String> {
        match self {
            ValidatorEntry::Single(validator) => reject(validator(value)),
            ValidatorEntry::Chain(validators) => {
                let failures: Vec<String> = validators
                    .iter()
                    .filter_map(|validator| reject(validator(value)))
                    .collect();
                failures.into_iter().next()
            }
        }
    }
}

/// Normalizes a validator result: empty messages are passes.
fn reject(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.is_empty())
}

impl fmt::Debug for ValidatorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatorEntry::Single(_) => f.write_str("Single(..)"),
            ValidatorEntry::Chain(validators) => {
                write!(f, "Chain({} validators)", validators.len())
            }
        }
    }
}

/// A tree of validator entries mirroring the data tree's shape.
///
/// Leaves hold [`ValidatorEntry`]s; internal nodes are the same keyed
/// mappings and lists as the data tree. A field with no validation is
/// simply absent from its parent node.
pub type ValidatorTree = Node<ValidatorEntry>;

impl Node<ValidatorEntry> {
    /// An empty keyed validator node, the usual starting point.
    pub fn keyed() -> Self {
        Node::Keyed(IndexMap::new())
    }

    /// A list validator node whose children validate list positions.
    pub fn list(children: Vec<Self>) -> Self {
        Node::List(children)
    }

    /// A leaf holding a single validator.
    pub fn rule(validator: ValidatorFn) -> Self {
        Node::Leaf(ValidatorEntry::single(validator))
    }

    /// A leaf holding an ordered chain of validators.
    ///
    /// # Panics
    ///
    /// Panics if `validators` is empty (see [`ValidatorEntry::chain`]).
    pub fn chain(validators: Vec<ValidatorFn>) -> Self {
        Node::Leaf(ValidatorEntry::chain(validators))
    }

    /// Adds a named child to a keyed validator node, builder style.
    ///
    /// # Panics
    ///
    /// Panics if called on a leaf or list node.
    pub fn field(mut self, name: impl Into<String>, child: Self) -> Self {
        match &mut self {
            Node::Keyed(map) => {
                map.insert(name.into(), child);
                self
            }
            other => panic!("field() requires a keyed validator node, got {}", other.kind()),
        }
    }

    /// Looks up the validator entry at `path`.
    ///
    /// Traversal mirrors [`Node::get`]: a missing key, an out-of-range
    /// index, or a path that continues past a leaf entry resolves to
    /// `Ok(None)` — no validator is registered there. A kind disagreement
    /// between a segment and the node it addresses (key into a list, index
    /// into a mapping) is a configuration defect and fails fast.
    pub fn resolve(&self, path: &FieldPath) -> Result<Option<&ValidatorEntry>, TreeError> {
        let mut node = self;
        for (depth, segment) in path.segments().enumerate() {
            node = match (node, segment) {
                (Node::Keyed(map), PathSegment::Key(key)) => match map.get(key) {
                    Some(child) => child,
                    None => return Ok(None),
                },
                (Node::List(items), PathSegment::Index(index)) => match items.get(*index) {
                    Some(child) => child,
                    None => return Ok(None),
                },
                (Node::Leaf(_), _) => return Ok(None),
                (other, segment) => {
                    return Err(TreeError::shape_mismatch(
                        path.prefix(depth),
                        segment.expects(),
                        other.kind(),
                    ))
                }
            };
        }
        match node {
            Node::Leaf(entry) => Ok(Some(entry)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_single_passes_and_fails() {
        let entry = ValidatorEntry::single(rules::non_empty());
        assert_eq!(entry.validate(""), Some("required".to_string()));
        assert_eq!(entry.validate("x"), None);
    }

    #[test]
    fn test_empty_message_is_a_pass() {
        let entry = ValidatorEntry::single(rules::from_fn(|_| Some(String::new())));
        assert_eq!(entry.validate("anything"), None);
    }

    #[test]
    fn test_chain_surfaces_first_failure() {
        let entry = ValidatorEntry::chain(vec![
            rules::from_fn(|_| None),
            rules::from_fn(|_| Some("bad".to_string())),
            rules::from_fn(|_| Some("worse".to_string())),
        ]);
        assert_eq!(entry.validate("v"), Some("bad".to_string()));
    }

    #[test]
    fn test_chain_evaluates_every_validator() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counting = |calls: &Arc<AtomicUsize>, message: &'static str| {
            let calls = Arc::clone(calls);
            rules::from_fn(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                Some(message.to_string())
            })
        };

        let entry = ValidatorEntry::chain(vec![
            counting(&calls, "first"),
            counting(&calls, "second"),
            counting(&calls, "third"),
        ]);

        assert_eq!(entry.validate(""), Some("first".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    #[should_panic(expected = "at least one validator")]
    fn test_empty_chain_panics() {
        ValidatorEntry::chain(Vec::new());
    }

    #[test]
    fn test_resolve_present_entry() {
        let spec = ValidatorTree::keyed().field(
            "address",
            ValidatorTree::keyed().field("zip", ValidatorTree::rule(rules::non_empty())),
        );

        let entry = spec.resolve(&FieldPath::keys(["address", "zip"])).unwrap();
        assert!(entry.is_some());
    }

    #[test]
    fn test_resolve_absent_is_not_an_error() {
        let spec = ValidatorTree::keyed().field("email", ValidatorTree::rule(rules::non_empty()));

        // unregistered sibling
        assert_eq!(spec.resolve(&FieldPath::key("name")).unwrap().map(|_| ()), None);
        // path deeper than the registered entry
        assert_eq!(
            spec.resolve(&FieldPath::keys(["email", "domain"]))
                .unwrap()
                .map(|_| ()),
            None
        );
        // path landing on a branch node
        assert_eq!(spec.resolve(&FieldPath::root()).unwrap().map(|_| ()), None);
    }

    #[test]
    fn test_resolve_shape_mismatch_fails_fast() {
        let spec = ValidatorTree::keyed().field(
            "tags",
            ValidatorTree::list(vec![ValidatorTree::rule(rules::non_empty())]),
        );

        let err = spec
            .resolve(&FieldPath::keys(["tags", "first"]))
            .unwrap_err();
        assert_eq!(
            err,
            TreeError::ShapeMismatch {
                path: FieldPath::key("tags"),
                expected: "keyed",
                got: "list",
            }
        );

        let err = spec.resolve(&FieldPath::root().push_index(0)).unwrap_err();
        assert_eq!(
            err,
            TreeError::ShapeMismatch {
                path: FieldPath::root(),
                expected: "list",
                got: "keyed",
            }
        );
    }

    #[test]
    fn test_resolve_list_positions() {
        let spec = ValidatorTree::keyed().field(
            "tags",
            ValidatorTree::list(vec![ValidatorTree::rule(rules::non_empty())]),
        );

        let in_range = FieldPath::key("tags").push_index(0);
        assert!(spec.resolve(&in_range).unwrap().is_some());

        let past_end = FieldPath::key("tags").push_index(3);
        assert!(spec.resolve(&past_end).unwrap().is_none());
    }
}
