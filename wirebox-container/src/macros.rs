//! Property-style access to dependencies.

/// Declares a trait with one accessor method per dependency name.
///
/// The trait is implemented for every [`Resolver`](crate::registry::Resolver),
/// so the accessors work both on a
/// [`Container`](crate::container::Container) and on the
/// [`Context`](crate::container::Context) a factory receives. Calling
/// `container.foo()` is the same as `container.get::<Foo>("foo")`.
///
/// A method name defaults to the dependency name; give an explicit name
/// with `= "..."` when they differ.
///
/// # Examples
/// ```rust
/// use std::rc::Rc;
/// use wirebox_container::prelude::*;
///
/// struct Bar;
/// struct Foo {
///     name: Rc<String>,
///     bar: Rc<Bar>,
/// }
///
/// wirebox_container::accessors! {
///     trait AppDeps {
///         a: String,
///         bar: Bar,
///         foo: Foo,
///         user_name: String = "userName",
///     }
/// }
///
/// let mut container = Container::new();
/// container
///     .add_value("a", String::from("hello"))?
///     .add_value("userName", String::from("ada"))?
///     .add("bar", |_| Ok(Bar))?
///     .add("foo", |ctx| Ok(Foo { name: ctx.a()?, bar: ctx.bar()? }))?;
///
/// assert_eq!(*container.foo()?.name, "hello");
/// assert_eq!(*container.user_name()?, "ada");
/// # Ok::<(), WireboxError>(())
/// ```
#[macro_export]
macro_rules! accessors {
    (@key $method:ident) => {
        stringify!($method)
    };
    (@key $method:ident $key:literal) => {
        $key
    };
    (
        $(#[$meta:meta])*
        $vis:vis trait $trait_name:ident {
            $(
                $(#[$method_meta:meta])*
                $method:ident : $ty:ty $(= $key:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis trait $trait_name: $crate::registry::Resolver {
            $(
                $(#[$method_meta])*
                fn $method(&self) -> $crate::error::Result<::std::rc::Rc<$ty>> {
                    let name = $crate::accessors!(@key $method $($key)?);
                    $crate::registry::downcast::<$ty>(
                        name,
                        $crate::registry::Resolver::resolve_raw(self, name)?,
                    )
                }
            )*
        }

        impl<R: $crate::registry::Resolver + ?Sized> $trait_name for R {}
    };
}
