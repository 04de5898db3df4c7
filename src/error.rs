//! Configuration-defect errors raised by tree operations.
//!
//! Validation failures are never represented here; they live in the error
//! tree as plain messages. `TreeError` covers the fail-fast cases where a
//! path or a validator tree disagrees with the shape of the data it
//! addresses.

use crate::path::FieldPath;

/// A structural disagreement between a path (or validator tree) and the
/// tree it is applied to.
///
/// Shape mismatches are programming or configuration defects, so they are
/// surfaced as `Err` at resolution/update time rather than being masked or
/// recorded as field errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The node found at `path` has a different kind (leaf/list/keyed) than
    /// the traversal required.
    #[error("shape mismatch at '{path}': expected {expected} node, got {got}")]
    ShapeMismatch {
        /// Path to the node where the disagreement was found.
        path: FieldPath,
        /// Node kind the path segment or validator tree required.
        expected: &'static str,
        /// Node kind actually present in the tree.
        got: &'static str,
    },
}

impl TreeError {
    pub(crate) fn shape_mismatch(path: FieldPath, expected: &'static str, got: &'static str) -> Self {
        TreeError::ShapeMismatch { path, expected, got }
    }
}
