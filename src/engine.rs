//! The form engine: owns the data and error trees and keeps them in sync.
//!
//! [`FormEngine`] is the state coordinator. It applies single-field updates
//! (lens set plus single-field validation), adopts externally replaced data
//! (controlled mode), and handles submission with a full revalidation. Every
//! mutating call runs to completion synchronously and then invokes the
//! registered change notification, which is the only externally visible
//! side effect besides the stored state.

use crate::error::TreeError;
use crate::path::FieldPath;
use crate::tree::{DataTree, ErrorTree, Node};
use crate::validator::ValidatorTree;
use crate::walk::{merge_errors, validate_tree};

/// Host callback invoked with the fresh `(data, errors)` pair after every
/// successful update.
pub type ChangeHandler = Box<dyn FnMut(&DataTree, &ErrorTree) + Send>;

/// Host callback invoked with the current data tree on submission.
pub type SubmitHandler = Box<dyn FnMut(&DataTree) + Send>;

/// The form state coordinator.
///
/// Owns the current data tree and error tree. All trees are immutable
/// values: every update produces new trees, so snapshots handed to the
/// host remain valid and comparable by structural equality.
///
/// # Example
///
/// ```rust
/// use intake::{rules, FieldPath, FormEngine, ValidatorTree};
///
/// let spec = ValidatorTree::keyed().field(
///     "email",
///     ValidatorTree::chain(vec![rules::non_empty(), rules::email()]),
/// );
///
/// let mut form = FormEngine::builder().validators(spec).build().unwrap();
///
/// let email = FieldPath::key("email");
/// form.field_changed(&email, "").unwrap();
/// assert_eq!(form.error_at(&email), Some("required"));
///
/// form.field_changed(&email, "a@b.com").unwrap();
/// assert_eq!(form.error_at(&email), None);
/// ```
pub struct FormEngine {
    data: DataTree,
    errors: ErrorTree,
    spec: ValidatorTree,
    on_change: Option<ChangeHandler>,
    on_submit: Option<SubmitHandler>,
}

impl FormEngine {
    /// Starts building a new engine.
    pub fn builder() -> FormEngineBuilder {
        FormEngineBuilder::default()
    }

    /// The current data tree.
    pub fn data(&self) -> &DataTree {
        &self.data
    }

    /// The current error tree.
    pub fn errors(&self) -> &ErrorTree {
        &self.errors
    }

    /// An owned copy of the current `(data, errors)` pair.
    pub fn snapshot(&self) -> (DataTree, ErrorTree) {
        (self.data.clone(), self.errors.clone())
    }

    /// The raw value at `path`, if a populated leaf is there.
    pub fn value_at(&self, path: &FieldPath) -> Option<&str> {
        self.data.leaf_str(path)
    }

    /// The error message at `path`, if one is recorded.
    pub fn error_at(&self, path: &FieldPath) -> Option<&str> {
        self.errors.leaf_str(path)
    }

    /// Applies a single field change from the host.
    ///
    /// Writes `raw` into the data tree at `path`, resolves the validator
    /// entry for that path, and validates the new value. With no entry the
    /// error tree is untouched; with one, the result is written at `path` —
    /// an explicit `None` when the field is now valid, clearing any prior
    /// message. Notifies the change handler with the fresh pair.
    ///
    /// # Errors
    ///
    /// Fails without committing any state when the path's shape disagrees
    /// with the data or validator tree.
    pub fn field_changed(
        &mut self,
        path: &FieldPath,
        raw: impl Into<String>,
    ) -> Result<(), TreeError> {
        let data = self.data.set(path, Node::Leaf(Some(raw.into())))?;

        if let Some(entry) = self.spec.resolve(path)? {
            let value = data.leaf_str(path).unwrap_or("");
            let message = entry.validate(value);
            self.errors = self.errors.set(path, Node::Leaf(message))?;
        }

        self.data = data;
        self.notify_change();
        Ok(())
    }

    /// Adopts externally owned data (controlled mode).
    ///
    /// A structurally equal tree is a no-op. Otherwise the new data is
    /// fully validated and the fresh error tree is merged over the previous
    /// one (fresh entries win, uncovered branches keep their shape), then
    /// the change handler is notified.
    pub fn replace_data(&mut self, new_data: DataTree) -> Result<(), TreeError> {
        if new_data == self.data {
            return Ok(());
        }

        let fresh = validate_tree(&new_data, &self.spec)?;
        self.errors = merge_errors(&self.errors, &fresh);
        self.data = new_data;
        self.notify_change();
        Ok(())
    }

    /// Handles a submission request.
    ///
    /// The error tree is recomputed from scratch by a full walk, discarding
    /// whatever partial state incremental validation left behind, and the
    /// change handler is notified. The submit handler then receives the
    /// current data tree unconditionally — submission is not gated on
    /// validity; the host decides what to do with the errors.
    pub fn submit(&mut self) -> Result<(), TreeError> {
        self.errors = validate_tree(&self.data, &self.spec)?;
        self.notify_change();
        if let Some(handler) = self.on_submit.as_mut() {
            handler(&self.data);
        }
        Ok(())
    }

    fn notify_change(&mut self) {
        if let Some(handler) = self.on_change.as_mut() {
            handler(&self.data, &self.errors);
        }
    }
}

/// Builder for [`FormEngine`].
///
/// All options default to empty: no initial data, no validators (so no
/// field is validated), and no handlers (uncontrolled mode with no
/// external notification).
#[derive(Default)]
pub struct FormEngineBuilder {
    initial_data: Option<DataTree>,
    spec: Option<ValidatorTree>,
    on_change: Option<ChangeHandler>,
    on_submit: Option<SubmitHandler>,
}

impl FormEngineBuilder {
    /// Seeds the engine with pre-populated data.
    ///
    /// Seeded data is fully validated during `build`, so a pre-populated
    /// form surfaces its errors before any field interaction.
    pub fn initial_data(mut self, data: DataTree) -> Self {
        self.initial_data = Some(data);
        self
    }

    /// Sets the validator tree.
    pub fn validators(mut self, spec: ValidatorTree) -> Self {
        self.spec = Some(spec);
        self
    }

    /// Registers the change notification handler.
    pub fn on_change(mut self, handler: impl FnMut(&DataTree, &ErrorTree) + Send + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// Registers the submit handler.
    pub fn on_submit(mut self, handler: impl FnMut(&DataTree) + Send + 'static) -> Self {
        self.on_submit = Some(Box::new(handler));
        self
    }

    /// Builds the engine, running one full validation if seeded with data.
    ///
    /// # Errors
    ///
    /// Fails when the initial data's shape disagrees with the validator
    /// tree.
    pub fn build(self) -> Result<FormEngine, TreeError> {
        let spec = self.spec.unwrap_or_else(ValidatorTree::keyed);

        let (data, errors) = match self.initial_data {
            Some(data) => {
                let errors = validate_tree(&data, &spec)?;
                (data, errors)
            }
            None => (DataTree::default(), ErrorTree::default()),
        };

        Ok(FormEngine {
            data,
            errors,
            spec,
            on_change: self.on_change,
            on_submit: self.on_submit,
        })
    }
}
