//! Point-in-time view of a container's registrations.
//!
//! Useful for diagnostics: which names exist and which have already been
//! built. Serializes with `serde`.

use std::fmt;

use serde::Serialize;

/// State of every registered dependency, sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerSnapshot {
    pub dependencies: Vec<DependencyState>,
}

/// One registered dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyState {
    pub name: String,
    /// Whether the factory has run and its value is cached.
    pub resolved: bool,
}

impl ContainerSnapshot {
    /// Names whose values are cached.
    pub fn resolved(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .iter()
            .filter(|d| d.resolved)
            .map(|d| d.name.as_str())
    }

    /// Names registered but not built yet.
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .iter()
            .filter(|d| !d.resolved)
            .map(|d| d.name.as_str())
    }
}

impl fmt::Display for ContainerSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dependency in &self.dependencies {
            let mark = if dependency.resolved { "x" } else { " " };
            writeln!(f, "[{mark}] {}", dependency.name)?;
        }
        Ok(())
    }
}
