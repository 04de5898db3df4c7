//! # Intake
//!
//! A form state engine that keeps three mirrored nested trees in lockstep:
//! the data record, the validator specification, and the error record.
//!
//! ## Overview
//!
//! Hosts (rendering layers) hand the engine explicit field paths and raw
//! string values; the engine updates the data tree through a copy-on-write
//! lens, runs the validators registered for that path, and maintains an
//! error tree that exactly mirrors the data tree's structure. Single-field
//! updates and full-tree validation (on load, external replacement, and
//! submission) are guaranteed to agree position by position.
//!
//! ## Core Types
//!
//! - [`FieldPath`]: a path to a node in a nested tree (e.g., `contacts[0].email`)
//! - [`Node`]: the recursive tree (`Leaf | List | Keyed`) shared by all three trees
//! - [`ValidatorTree`] / [`ValidatorEntry`]: the rules mirroring the data's shape
//! - [`FormEngine`]: the state coordinator owning the current `(data, errors)` pair
//!
//! ## Example
//!
//! ```rust
//! use intake::{rules, FieldPath, FormEngine, ValidatorTree};
//!
//! let spec = ValidatorTree::keyed().field(
//!     "email",
//!     ValidatorTree::chain(vec![rules::non_empty(), rules::email()]),
//! );
//!
//! let mut form = FormEngine::builder().validators(spec).build().unwrap();
//!
//! let email = FieldPath::key("email");
//! form.field_changed(&email, "").unwrap();
//! assert_eq!(form.error_at(&email), Some("required"));
//!
//! form.field_changed(&email, "a@b.com").unwrap();
//! assert_eq!(form.error_at(&email), None);
//! ```

pub mod engine;
pub mod error;
pub mod path;
pub mod registry;
pub mod rules;
pub mod tree;
pub mod validator;
pub mod walk;

pub use engine::{ChangeHandler, FormEngine, FormEngineBuilder, SubmitHandler};
pub use error::TreeError;
pub use path::{FieldPath, PathParseError, PathSegment};
pub use registry::{RegistryError, ValidatorRegistry};
pub use tree::{DataTree, ErrorTree, Node};
pub use validator::{ValidatorEntry, ValidatorFn, ValidatorTree};
pub use walk::{merge_errors, validate_tree};
