//! Provider trait: a module of related dependency registrations.
//!
//! Providers group related dependencies together so that each part of an
//! application can register its own services in its own file.
//!
//! # Examples
//! ```rust
//! use wirebox_container::prelude::*;
//!
//! struct DatabaseProvider {
//!     url: &'static str,
//! }
//!
//! impl Provider for DatabaseProvider {
//!     fn register(&self, container: &mut Container) -> Result<()> {
//!         let url = self.url;
//!         container
//!             .add_value("databaseUrl", url.to_string())?
//!             .add("database", |ctx| Ok(format!("connected to {}", ctx.get::<String>("databaseUrl")?)))?;
//!         Ok(())
//!     }
//! }
//!
//! let mut container = Container::new();
//! container.provide(&DatabaseProvider { url: "postgres://localhost" })?;
//! assert_eq!(*container.get::<String>("database")?, "connected to postgres://localhost");
//! # Ok::<(), WireboxError>(())
//! ```

use crate::container::Container;
use crate::error::Result;

/// A module that registers related dependencies into a container.
///
/// Applied with [`Container::provide`]. A provider only sees the
/// container's public registration surface, so it goes through the same
/// name guards as any other caller.
///
/// ```rust,ignore
/// container
///     .provide(&DatabaseProvider)?
///     .provide(&AuthProvider)?
///     .provide(&EmailProvider)?;
/// ```
pub trait Provider {
    /// Register dependencies into the container.
    fn register(&self, container: &mut Container) -> Result<()>;

    /// Optional: human-readable name for logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
