//! # wirebox: lazy dependency container for Rust
//!
//! Register named factories, resolve them on first access, and get the
//! same singleton on every access after that.
//!
//! ```rust
//! use std::rc::Rc;
//! use wirebox::prelude::*;
//!
//! let mut container = Container::new();
//! container
//!     .add("a", |_| Ok(String::from("hello")))?
//!     .add("greeting", |ctx| Ok(format!("{} world", ctx.get::<String>("a")?)))?;
//!
//! let greeting: Rc<String> = container.get("greeting")?;
//! assert_eq!(*greeting, "hello world");
//! # Ok::<(), WireboxError>(())
//! ```

pub use wirebox_container::accessors;
pub use wirebox_container::*;
pub use wirebox_support::*;
