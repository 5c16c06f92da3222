//! Dependency registry: the resolver table and its resolution cache.
//!
//! Each name maps to one [`Entry`] holding the factory and a cell for the
//! value it produced. Keeping both in one entry means a cached value can
//! never outlive the factory that built it.

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use once_cell::unsync::OnceCell;
use tracing::{debug, trace};

use crate::container::Context;
use crate::error::{DuplicateDependencyError, MissingDependencyError, Result, WireboxError};

/// A resolved dependency, type-erased.
pub type Instance = Rc<dyn Any>;

/// Type alias for factory functions.
///
/// A factory takes the [`Context`] (to resolve the dependencies it needs)
/// and returns the built value or an error.
///
/// `Rc` rather than `Box` so that cloned containers share factories
/// without requiring the closure to be `Clone`.
pub type FactoryFn = Rc<dyn Fn(&Context<'_>) -> Result<Instance>>;

/// Trait for looking up dependencies by name.
///
/// Implemented by [`Container`](crate::container::Container) and by the
/// [`Context`] handed to factories. Property-style accessors generated by
/// [`accessors!`](crate::accessors) work with any resolver.
pub trait Resolver {
    /// Resolves `name` to its type-erased value.
    fn resolve_raw(&self, name: &str) -> Result<Instance>;

    /// Returns `true` if a factory is registered under `name`.
    fn contains(&self, name: &str) -> bool;

    /// Resolves `name` and downcasts it to `T`.
    fn resolve<T: 'static>(&self, name: &str) -> Result<Rc<T>>
    where
        Self: Sized,
    {
        downcast(name, self.resolve_raw(name)?)
    }
}

/// Downcasts a resolved value, reporting the dependency name on mismatch.
pub fn downcast<T: 'static>(name: &str, instance: Instance) -> Result<Rc<T>> {
    instance.downcast::<T>().map_err(|_| WireboxError::TypeMismatch {
        name: name.to_string(),
        expected: type_name::<T>(),
    })
}

/// Registration entry for a single dependency.
#[derive(Clone)]
pub(crate) struct Entry {
    pub factory: FactoryFn,
    /// Filled on first resolve; cleared only by replacing the entry.
    pub cell: OnceCell<Instance>,
}

impl Entry {
    fn new(factory: FactoryFn) -> Self {
        Self {
            factory,
            cell: OnceCell::new(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// Stores all registrations of one container.
#[derive(Debug, Clone, Default)]
pub(crate) struct Registry {
    entries: HashMap<String, Entry>,
}

impl Registry {
    /// Registers a factory under a new name.
    ///
    /// # Errors
    /// Returns [`WireboxError::DuplicateDependency`] if the name is taken.
    /// The existing entry is left untouched.
    pub fn register(&mut self, name: &str, factory: FactoryFn) -> Result<()> {
        if self.entries.contains_key(name) {
            return Err(WireboxError::DuplicateDependency(DuplicateDependencyError {
                name: name.to_string(),
            }));
        }

        debug!(name, "Registered dependency");
        self.entries.insert(name.to_string(), Entry::new(factory));
        Ok(())
    }

    /// Replaces the factory of an existing name and drops its cached value.
    ///
    /// # Errors
    /// Returns [`WireboxError::DependencyMissing`] if the name is unknown.
    pub fn replace(&mut self, name: &str, factory: FactoryFn) -> Result<()> {
        let Some(entry) = self.entries.get_mut(name) else {
            return Err(self.missing(name, None));
        };

        let was_resolved = entry.is_resolved();
        *entry = Entry::new(factory);
        debug!(name, invalidated = was_resolved, "Updated dependency");
        Ok(())
    }

    /// Moves every entry of `other` into this registry.
    ///
    /// On collision the incoming entry wins, together with whatever value
    /// it had already resolved. Returns how many names were overridden.
    pub fn absorb(&mut self, other: Registry) -> usize {
        let mut overridden = 0;
        for (name, entry) in other.entries {
            trace!(name = %name, resolved = entry.is_resolved(), "Merging dependency");
            if self.entries.insert(name, entry).is_some() {
                overridden += 1;
            }
        }
        overridden
    }

    /// Looks up an entry by name.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the number of registered dependencies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no dependencies are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of dependencies with a cached value.
    pub fn resolved_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_resolved()).count()
    }

    /// All registered names with their entries, sorted by name.
    pub fn sorted_entries(&self) -> Vec<(&str, &Entry)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Builds the error for an unknown name, with "did you mean?" hints.
    pub fn missing(&self, name: &str, required_by: Option<String>) -> WireboxError {
        WireboxError::DependencyMissing(MissingDependencyError {
            name: name.to_string(),
            required_by,
            suggestions: self.suggestions(name),
        })
    }

    /// Registered names close to `name`.
    pub fn suggestions(&self, name: &str) -> Vec<String> {
        wirebox_support::rendering::suggest_similar(
            name,
            self.entries.keys().map(String::as_str),
            3,
        )
    }
}
