//! # The Container, heart of wirebox
//!
//! A registry of named factories that resolves each one lazily, on first
//! access, into a singleton owned by the container.
//!
//! # Architecture
//! ```text
//!   add / update ──> Registry (name → factory + cached value)
//!                         │
//!                      get(name)
//!                         │
//!                         ▼
//!   factory(&Context) ──> Context::get(other) ──> Container::get(other)
//! ```
//!
//! Containers compose with [`extend`](Container::extend),
//! [`merge`](Container::merge) and [`clone`](Clone::clone).
//!
//! # Examples
//! ```rust
//! use wirebox_container::prelude::*;
//! use std::rc::Rc;
//!
//! struct Config {
//!     url: String,
//! }
//!
//! struct Database {
//!     config: Rc<Config>,
//! }
//!
//! let mut container = Container::new();
//! container
//!     .add("config", |_| Ok(Config { url: "postgres://localhost".into() }))?
//!     .add("database", |ctx| Ok(Database { config: ctx.get("config")? }))?;
//!
//! let db: Rc<Database> = container.get("database")?;
//! assert_eq!(db.config.url, "postgres://localhost");
//!
//! // Singleton per container: the same value on every access.
//! assert!(Rc::ptr_eq(&db, &container.get("database")?));
//! # Ok::<(), WireboxError>(())
//! ```

use std::fmt;
use std::rc::Rc;

use tracing::{debug, instrument, trace};

use crate::chain::ResolutionChain;
use crate::error::Result;
use crate::name::{ensure_allowed, ensure_not_operation};
use crate::provider::Provider;
use crate::registry::{FactoryFn, Instance, Registry, Resolver, downcast};
use crate::snapshot::{ContainerSnapshot, DependencyState};

// ═══════════════════════════════════════════
// Container
// ═══════════════════════════════════════════

/// Lazy, singleton-per-container dependency container.
///
/// Single-threaded: values are shared through [`Rc`], so the container
/// is neither `Send` nor `Sync`.
#[derive(Default)]
pub struct Container {
    registry: Registry,
    chain: ResolutionChain,
}

impl Container {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Registration ──

    /// Registers a factory under a new name.
    ///
    /// The factory runs at most once, on the first [`get`](Self::get).
    ///
    /// # Errors
    /// - [`WireboxError::NameForbidden`](crate::error::WireboxError::NameForbidden)
    ///   if `name` is a container operation
    /// - [`WireboxError::DuplicateDependency`](crate::error::WireboxError::DuplicateDependency)
    ///   if `name` is taken; use [`update`](Self::update) to replace it
    pub fn add<T, F>(&mut self, name: &str, factory: F) -> Result<&mut Self>
    where
        T: 'static,
        F: Fn(&Context<'_>) -> Result<T> + 'static,
    {
        ensure_allowed(name)?;
        self.registry.register(name, erase(factory))?;
        Ok(self)
    }

    /// Registers an already built value.
    ///
    /// The value is wrapped in an [`Rc`] once, so every container cloned
    /// from this one hands out the same instance.
    pub fn add_value<T: 'static>(&mut self, name: &str, value: T) -> Result<&mut Self> {
        ensure_allowed(name)?;
        let instance: Instance = Rc::new(value);
        self.registry.register(
            name,
            Rc::new(move |_: &Context<'_>| -> Result<Instance> { Ok(instance.clone()) }),
        )?;
        Ok(self)
    }

    /// Replaces the factory of an existing dependency.
    ///
    /// A value already resolved under `name` is dropped from the cache;
    /// the next [`get`](Self::get) runs the new factory.
    ///
    /// # Errors
    /// - [`WireboxError::NameForbidden`](crate::error::WireboxError::NameForbidden)
    ///   if `name` is a container operation
    /// - [`WireboxError::DependencyMissing`](crate::error::WireboxError::DependencyMissing)
    ///   if nothing is registered under `name`; use [`add`](Self::add)
    pub fn update<T, F>(&mut self, name: &str, factory: F) -> Result<&mut Self>
    where
        T: 'static,
        F: Fn(&Context<'_>) -> Result<T> + 'static,
    {
        ensure_allowed(name)?;
        self.registry.replace(name, erase(factory))?;
        Ok(self)
    }

    /// Returns `true` if a factory is registered under `name`.
    ///
    /// Never triggers resolution.
    pub fn has(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    // ── Resolution ──

    /// Resolves a dependency by name.
    ///
    /// ```rust,ignore
    /// let db: Rc<Database> = container.get("database")?;
    /// ```
    ///
    /// # Errors
    /// Missing name, a value of another type than `T`, a cycle, or
    /// whatever the factory returned.
    pub fn get<T: 'static>(&self, name: &str) -> Result<Rc<T>> {
        downcast(name, self.get_raw(name)?)
    }

    /// Resolves a dependency by name without downcasting it.
    pub fn get_raw(&self, name: &str) -> Result<Instance> {
        let entry = self
            .registry
            .get(name)
            .ok_or_else(|| self.registry.missing(name, self.chain.current()))?;

        if let Some(value) = entry.cell.get() {
            trace!(name, "Cache hit");
            return Ok(value.clone());
        }

        let _guard = self.chain.enter(name)?;
        trace!(name, depth = self.chain.depth(), "Resolving");

        let context = Context { container: self };
        let value = entry.cell.get_or_try_init(|| (entry.factory)(&context))?;
        Ok(value.clone())
    }

    /// Returns `true` if `name` has been resolved and its value is cached.
    pub fn is_resolved(&self, name: &str) -> bool {
        self.registry.get(name).is_some_and(|e| e.is_resolved())
    }

    // ── Composition ──

    /// Passes this container to `f` and returns what `f` returns.
    ///
    /// Lets registrations live in separate functions:
    ///
    /// ```rust
    /// use wirebox_container::prelude::*;
    ///
    /// fn add_greeter(container: &mut Container) -> Result<&mut Container> {
    ///     container.add("greeting", |ctx| {
    ///         let name = ctx.get::<String>("name")?;
    ///         Ok(format!("hello {name}"))
    ///     })
    /// }
    ///
    /// let mut container = Container::new();
    /// container.add_value("name", String::from("world"))?.extend(add_greeter)?;
    ///
    /// assert_eq!(*container.get::<String>("greeting")?, "hello world");
    /// # Ok::<(), WireboxError>(())
    /// ```
    pub fn extend<F>(&mut self, f: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Self) -> Result<&mut Self>,
    {
        f(self)
    }

    /// Applies a [`Provider`] module.
    pub fn provide(&mut self, provider: &dyn Provider) -> Result<&mut Self> {
        debug!(provider = provider.name(), "Applying provider");
        self.extend(|container| {
            provider.register(container)?;
            Ok(container)
        })
    }

    /// Folds `other` into this container.
    ///
    /// Every name of `other` is added, overriding this container's entry on
    /// collision. An entry carries its resolved value along: names resolved
    /// only here stay resolved, names defined by `other` take `other`'s
    /// state. Unlike [`add`](Self::add), this never fails.
    #[instrument(skip_all, fields(incoming = other.len()))]
    pub fn merge(&mut self, other: Container) -> &mut Self {
        let overridden = self.registry.absorb(other.registry);
        debug!(overridden, total = self.len(), "Merged container");
        self
    }

    // ── Introspection ──

    /// Returns the number of registered dependencies.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.registry
            .sorted_entries()
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }

    /// Captures which dependencies exist and which are resolved.
    pub fn snapshot(&self) -> ContainerSnapshot {
        let dependencies = self
            .registry
            .sorted_entries()
            .into_iter()
            .map(|(name, entry)| DependencyState {
                name: name.to_string(),
                resolved: entry.is_resolved(),
            })
            .collect();

        ContainerSnapshot { dependencies }
    }
}

/// Wraps a typed factory into a type-erased one.
fn erase<T, F>(factory: F) -> FactoryFn
where
    T: 'static,
    F: Fn(&Context<'_>) -> Result<T> + 'static,
{
    Rc::new(move |context: &Context<'_>| -> Result<Instance> {
        Ok(Rc::new(factory(context)?) as Instance)
    })
}

impl Clone for Container {
    /// Copies the resolver table and the cache.
    ///
    /// The copy is independent: registering, updating or resolving on one
    /// side is never seen by the other. Values resolved before the clone
    /// are shared between both.
    fn clone(&self) -> Self {
        debug!(
            registered = self.len(),
            resolved = self.registry.resolved_count(),
            "Cloning container"
        );
        Self {
            registry: self.registry.clone(),
            chain: ResolutionChain::new(),
        }
    }
}

impl Resolver for Container {
    fn resolve_raw(&self, name: &str) -> Result<Instance> {
        self.get_raw(name)
    }

    fn contains(&self, name: &str) -> bool {
        self.has(name)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("registered", &self.registry.len())
            .field("resolved", &self.registry.resolved_count())
            .finish()
    }
}

// ═══════════════════════════════════════════
// Context
// ═══════════════════════════════════════════

/// Read-only view of a container, passed to factories.
///
/// Exposes lookups only. Asking it for a container operation by name
/// (`"add"`, `"update"`, ...) fails with
/// [`WireboxError::IncorrectInvocation`](crate::error::WireboxError::IncorrectInvocation).
#[derive(Clone, Copy)]
pub struct Context<'a> {
    container: &'a Container,
}

impl Context<'_> {
    /// Resolves a dependency, exactly like [`Container::get`].
    pub fn get<T: 'static>(&self, name: &str) -> Result<Rc<T>> {
        downcast(name, self.get_raw(name)?)
    }

    /// Resolves a dependency without downcasting it.
    pub fn get_raw(&self, name: &str) -> Result<Instance> {
        ensure_not_operation(name)?;
        self.container.get_raw(name)
    }

    /// Returns `true` if a factory is registered under `name`.
    pub fn has(&self, name: &str) -> bool {
        self.container.has(name)
    }
}

impl Resolver for Context<'_> {
    fn resolve_raw(&self, name: &str) -> Result<Instance> {
        self.get_raw(name)
    }

    fn contains(&self, name: &str) -> bool {
        self.has(name)
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("resolving", &self.container.chain.current())
            .finish()
    }
}

// ═══════════════════════════════════════════
// Free function for use with trait objects
// ═══════════════════════════════════════════

/// Resolve a typed dependency from a `dyn` [`Resolver`].
///
/// ```rust,ignore
/// fn build(r: &dyn Resolver) -> Result<Rc<Database>> {
///     wirebox_container::container::resolve(r, "database")
/// }
/// ```
pub fn resolve<T: 'static>(resolver: &dyn Resolver, name: &str) -> Result<Rc<T>> {
    downcast(name, resolver.resolve_raw(name)?)
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::{Container, Context, resolve};
    pub use crate::error::{Result, WireboxError};
    pub use crate::provider::Provider;
    pub use crate::registry::{Instance, Resolver};
    pub use crate::snapshot::ContainerSnapshot;
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
