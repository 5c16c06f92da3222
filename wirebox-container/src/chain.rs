//! Resolution chain tracking.
//!
//! While a factory runs, its name stays on the container's chain. Asking
//! for a name that is already on the chain means the value would need
//! itself to be built, which is reported as a circular dependency instead
//! of recursing forever.

use std::cell::RefCell;

use tracing::warn;

use crate::error::{CircularDependencyError, Result, WireboxError};

/// Names currently being resolved, outermost first.
#[derive(Debug, Default)]
pub(crate) struct ResolutionChain {
    names: RefCell<Vec<String>>,
}

impl ResolutionChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `name` onto the chain for as long as the guard lives.
    ///
    /// # Errors
    /// [`WireboxError::CircularDependency`] if `name` is already being
    /// resolved. The chain in the error starts at the first occurrence
    /// and ends with the repeated name.
    pub fn enter(&self, name: &str) -> Result<ChainGuard<'_>> {
        let mut names = self.names.borrow_mut();

        if let Some(cycle_start) = names.iter().position(|n| n == name) {
            let mut chain: Vec<String> = names[cycle_start..].to_vec();
            chain.push(name.to_string());

            warn!(cycle = ?chain, "Circular dependency detected!");

            return Err(WireboxError::CircularDependency(CircularDependencyError {
                chain,
            }));
        }

        names.push(name.to_string());
        Ok(ChainGuard { chain: self })
    }

    /// The name whose factory is currently running, if any.
    pub fn current(&self) -> Option<String> {
        self.names.borrow().last().cloned()
    }

    pub fn depth(&self) -> usize {
        self.names.borrow().len()
    }
}

/// Pops its name off the chain when dropped, including on error or panic.
pub(crate) struct ChainGuard<'a> {
    chain: &'a ResolutionChain,
}

impl Drop for ChainGuard<'_> {
    fn drop(&mut self) {
        self.chain.names.borrow_mut().pop();
    }
}
