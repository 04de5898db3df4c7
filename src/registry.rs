//! Named validator storage for building specs from shared definitions.
//!
//! This module provides the [`ValidatorRegistry`] type that stores named
//! validator functions so hosts can assemble validator trees from a shared
//! vocabulary ("required", "email", ...) instead of re-creating closures at
//! every call site.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::validator::{ValidatorEntry, ValidatorFn};

/// Type alias for the validator storage map.
type RuleMap = Arc<RwLock<HashMap<String, ValidatorFn>>>;

/// A thread-safe registry of named validators.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access: many
/// threads may look validators up concurrently while registration is
/// serialized. Cloning a registry is cheap and shares the same storage.
///
/// # Example
///
/// ```rust
/// use intake::{rules, ValidatorRegistry, ValidatorTree};
///
/// let registry = ValidatorRegistry::new();
/// registry.register("required", rules::non_empty()).unwrap();
/// registry.register("email", rules::email()).unwrap();
///
/// let spec = ValidatorTree::keyed().field(
///     "email",
///     ValidatorTree::Leaf(registry.chain(&["required", "email"]).unwrap()),
/// );
/// ```
pub struct ValidatorRegistry {
    rules: RuleMap,
}

impl ValidatorRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            rules: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a validator under a name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already taken.
    pub fn register(
        &self,
        name: impl Into<String>,
        validator: ValidatorFn,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut rules = self.rules.write();

        if rules.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        rules.insert(name, validator);
        Ok(())
    }

    /// Retrieves a validator by name.
    pub fn get(&self, name: &str) -> Option<ValidatorFn> {
        self.rules.read().get(name).cloned()
    }

    /// Builds a single-validator entry from a registered name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if the name is not registered.
    pub fn entry(&self, name: &str) -> Result<ValidatorEntry, RegistryError> {
        self.get(name)
            .map(ValidatorEntry::single)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Builds an ordered chain entry from registered names.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` for the first missing name, or
    /// `RegistryError::EmptyChain` when no names are given.
    pub fn chain(&self, names: &[&str]) -> Result<ValidatorEntry, RegistryError> {
        if names.is_empty() {
            return Err(RegistryError::EmptyChain);
        }

        let validators = names
            .iter()
            .map(|name| {
                self.get(name)
                    .ok_or_else(|| RegistryError::NotFound((*name).to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ValidatorEntry::chain(validators))
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ValidatorRegistry {
    fn clone(&self) -> Self {
        Self {
            rules: Arc::clone(&self.rules),
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a validator with a name that already exists.
    #[error("validator '{0}' already registered")]
    DuplicateName(String),

    /// Referenced a validator name that doesn't exist.
    #[error("validator '{0}' not found")]
    NotFound(String),

    /// Attempted to build a chain from an empty list of names.
    #[error("a validator chain requires at least one name")]
    EmptyChain,
}
