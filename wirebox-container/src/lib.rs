//! Core container implementation for wirebox.

mod chain;
pub mod container;
pub mod error;
mod macros;
pub mod name;
pub mod provider;
pub mod registry;
pub mod snapshot;

pub use container::{Container, Context, prelude};
pub use error::{Result, WireboxError};
pub use provider::Provider;
pub use registry::{Instance, Resolver};
pub use snapshot::ContainerSnapshot;
