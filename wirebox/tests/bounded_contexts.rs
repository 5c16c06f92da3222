use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wirebox::prelude::*;

struct Bar;

struct Buzz {
    name: RefCell<String>,
}

impl Buzz {
    fn new(name: &str) -> Self {
        Self {
            name: RefCell::new(name.to_string()),
        }
    }
}

struct Foo {
    name: Rc<String>,
    bar: Rc<Bar>,
}

wirebox::accessors! {
    trait Deps {
        a: String,
        bar: Bar,
        buzz: Buzz,
        foo: Foo,
    }
}

fn base() -> Container {
    let mut container = Container::new();
    container
        .add("a", |_| Ok(String::from("1")))
        .unwrap()
        .add("bar", |_| Ok(Bar))
        .unwrap();
    container
}

#[test]
fn extend_uses_dependencies_registered_before() {
    let mut container = base();
    container
        .extend(|c| c.add("foo", |ctx| Ok(Foo { name: ctx.a()?, bar: ctx.bar()? })))
        .unwrap();

    let foo = container.foo().unwrap();
    assert_eq!(*foo.name, "1");
    assert!(Rc::ptr_eq(&foo.bar, &container.bar().unwrap()));
}

#[test]
fn clones_register_the_same_name_independently() {
    let base = base();

    let mut context_a = base.clone();
    context_a.add("buzz", |_| Ok(Buzz::new("buzzA"))).unwrap();
    let mut context_b = base.clone();
    context_b.add("buzz", |_| Ok(Buzz::new("buzzB"))).unwrap();

    assert_eq!(*context_a.buzz().unwrap().name.borrow(), "buzzA");
    assert_eq!(*context_b.buzz().unwrap().name.borrow(), "buzzB");
    assert!(!Rc::ptr_eq(&context_a.buzz().unwrap(), &context_b.buzz().unwrap()));
}

#[test]
fn merged_container_keeps_and_overrides() {
    let mut container_a = Container::new();
    container_a.add("buzz", |_| Ok(Buzz::new("buzz"))).unwrap();
    container_a.add("a", |_| Ok(String::from("1"))).unwrap();
    *container_a.buzz().unwrap().name.borrow_mut() = "buzz2".into();

    let mut container_b = Container::new();
    container_b.add("a", |_| Ok(String::from("2"))).unwrap();

    container_a.merge(container_b);

    assert_eq!(*container_a.a().unwrap(), "2");
    assert_eq!(*container_a.buzz().unwrap().name.borrow(), "buzz2");
}

#[test]
fn factory_runs_once_across_accessors_and_get() {
    let calls = Rc::new(Cell::new(0));
    let mut container = Container::new();
    container
        .add("bar", {
            let calls = calls.clone();
            move |_| {
                calls.set(calls.get() + 1);
                Ok(Bar)
            }
        })
        .unwrap();

    let via_accessor = container.bar().unwrap();
    let via_get = container.get::<Bar>("bar").unwrap();

    assert!(Rc::ptr_eq(&via_accessor, &via_get));
    assert_eq!(calls.get(), 1);
}

#[test]
fn factories_cannot_reach_container_operations() {
    let mut container = Container::new();
    container
        .add("foo", |ctx| {
            ctx.get::<i32>("update")?;
            Ok(0)
        })
        .unwrap();

    let err = container.get::<i32>("foo").unwrap_err();
    assert!(matches!(err, WireboxError::IncorrectInvocation { .. }));
    assert!(err.to_string().contains("update"));
}

#[test]
fn missing_dependency_message_names_it() {
    let err = Container::new().get::<i32>("x").unwrap_err();
    assert_eq!(err.dependency_name(), Some("x"));
    assert!(err.to_string().contains("with name x is not defined"));
}
