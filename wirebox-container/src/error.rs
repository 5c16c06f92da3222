//! Error types for wirebox container operations.
//!
//! Every failure is returned at the offending call and names the
//! dependency involved, with a hint on how to fix it.

use std::fmt;

use wirebox_support::rendering::{render_chain, shorten_type_name};

use crate::name::RESERVED_NAMES;

/// Main error type for all wirebox operations.
#[derive(Debug, thiserror::Error)]
pub enum WireboxError {
    /// Registration or replacement under a reserved operation name.
    #[error("{}", .0)]
    NameForbidden(ForbiddenNameError),

    /// `add` called for a name that is already registered.
    #[error("{}", .0)]
    DuplicateDependency(DuplicateDependencyError),

    /// `get` or `update` referencing a name with no registered factory.
    #[error("{}", .0)]
    DependencyMissing(MissingDependencyError),

    /// A factory asked its context for a container operation.
    #[error(
        "Incorrect invocation of container: `{operation}` is not available inside a factory"
    )]
    IncorrectInvocation { operation: String },

    /// A factory transitively required its own value.
    #[error("{}", .0)]
    CircularDependency(CircularDependencyError),

    /// The resolved value is not of the requested type.
    #[error("Dependency {name} is not of type {}", shorten_type_name(.expected))]
    TypeMismatch {
        name: String,
        expected: &'static str,
    },

    /// A factory returned its own error while building a value.
    #[error("Failed to construct {name}: {source}")]
    ConstructionFailed {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl WireboxError {
    /// Wraps a factory's own error.
    ///
    /// ```rust
    /// use wirebox_container::prelude::*;
    ///
    /// let mut container = Container::new();
    /// container
    ///     .add("port", |_| {
    ///         "80a".parse::<u16>().map_err(|e| WireboxError::construction("port", e))
    ///     })
    ///     .unwrap();
    ///
    /// let err = container.get::<u16>("port").unwrap_err();
    /// assert!(matches!(err, WireboxError::ConstructionFailed { .. }));
    /// ```
    pub fn construction(
        name: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        WireboxError::ConstructionFailed {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Returns the dependency name this error is about, if any.
    pub fn dependency_name(&self) -> Option<&str> {
        match self {
            WireboxError::NameForbidden(e) => Some(&e.name),
            WireboxError::DuplicateDependency(e) => Some(&e.name),
            WireboxError::DependencyMissing(e) => Some(&e.name),
            WireboxError::IncorrectInvocation { .. } => None,
            WireboxError::CircularDependency(e) => e.chain.last().map(String::as_str),
            WireboxError::TypeMismatch { name, .. } => Some(name),
            WireboxError::ConstructionFailed { name, .. } => Some(name),
        }
    }
}

/// Error when a name collides with a container operation.
#[derive(Debug)]
pub struct ForbiddenNameError {
    pub name: String,
}

impl fmt::Display for ForbiddenNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dependency resolver with name {} is not allowed", self.name)?;
        write!(f, "\n  Reserved names: {}", RESERVED_NAMES.join(", "))
    }
}

/// Error when trying to add a dependency that already exists.
#[derive(Debug)]
pub struct DuplicateDependencyError {
    pub name: String,
}

impl fmt::Display for DuplicateDependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dependency resolver with name {} is already defined, use update method instead",
            self.name
        )
    }
}

/// Error when a dependency was never registered.
#[derive(Debug)]
pub struct MissingDependencyError {
    /// The name that was requested
    pub name: String,
    /// The dependency whose factory asked for it (if any)
    pub required_by: Option<String>,
    /// Registered names close to the requested one
    pub suggestions: Vec<String>,
}

impl fmt::Display for MissingDependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dependency resolver with name {} is not defined", self.name)?;

        if let Some(ref parent) = self.required_by {
            write!(f, "\n  Required by: {parent}")?;
        }

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n    - {suggestion}")?;
            }
        }

        write!(f, "\n  Hint: register it with .add(\"{}\", ...) first", self.name)
    }
}

/// Error when a dependency requires itself, directly or transitively.
#[derive(Debug)]
pub struct CircularDependencyError {
    /// Names being resolved, ending with the repeated one.
    /// Example: ["a", "b", "a"]
    pub chain: Vec<String>,
}

impl fmt::Display for CircularDependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Circular dependency detected:\n  {}", render_chain(&self.chain))?;
        write!(
            f,
            "\n  Hint: a factory may only use dependencies that do not need its own value"
        )
    }
}

/// Convenient Result type for wirebox operations.
pub type Result<T> = std::result::Result<T, WireboxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_name_display() {
        let err = WireboxError::NameForbidden(ForbiddenNameError { name: "get".into() });
        let msg = format!("{err}");
        assert!(msg.contains("get is not allowed"));
        assert!(msg.contains("update"));
    }

    #[test]
    fn duplicate_display_points_to_update() {
        let err = WireboxError::DuplicateDependency(DuplicateDependencyError {
            name: "key1".into(),
        });
        assert_eq!(
            format!("{err}"),
            "Dependency resolver with name key1 is already defined, use update method instead"
        );
    }

    #[test]
    fn missing_display_with_context() {
        let err = WireboxError::DependencyMissing(MissingDependencyError {
            name: "databse".into(),
            required_by: Some("userRepo".into()),
            suggestions: vec!["database".into()],
        });

        let msg = format!("{err}");
        assert!(msg.starts_with("Dependency resolver with name databse is not defined"));
        assert!(msg.contains("Required by: userRepo"));
        assert!(msg.contains("- database"));
    }

    #[test]
    fn circular_display() {
        let err = WireboxError::CircularDependency(CircularDependencyError {
            chain: vec!["a".into(), "b".into(), "a".into()],
        });

        let msg = format!("{err}");
        assert!(msg.contains("Circular"));
        assert!(msg.contains("a → b → a"));
    }

    #[test]
    fn type_mismatch_shortens_type() {
        let err = WireboxError::TypeMismatch {
            name: "port".into(),
            expected: std::any::type_name::<String>(),
        };
        assert_eq!(format!("{err}"), "Dependency port is not of type String");
    }

    #[test]
    fn construction_keeps_source() {
        let source = "x".parse::<u8>().unwrap_err();
        let err = WireboxError::construction("port", source);

        assert!(format!("{err}").starts_with("Failed to construct port:"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn dependency_name_of_each_variant() {
        let invocation = WireboxError::IncorrectInvocation { operation: "add".into() };
        assert_eq!(invocation.dependency_name(), None);

        let circular = WireboxError::CircularDependency(CircularDependencyError {
            chain: vec!["a".into(), "a".into()],
        });
        assert_eq!(circular.dependency_name(), Some("a"));
    }
}
