//! Lexically-scoped variable bindings.
//!
//! An environment is a mapping from name to object plus an optional
//! reference to an outer (enclosing) environment. A [`Function`]'s captured
//! environment is the environment in force where its `fn` literal was
//! evaluated — this is the closure mechanism. Environments are
//! reference-counted; a function that stores itself under its own name
//! creates an intentional reference cycle (see DESIGN.md).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Object;

#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Rc<Object>>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    /// A new environment enclosed by `outer`, created on each function call.
    pub fn enclosed(outer: Rc<RefCell<Environment>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            store: HashMap::new(),
            outer: Some(outer),
        }))
    }

    /// Walk outward until `name` is found or the chain ends.
    pub fn get(&self, name: &str) -> Option<Rc<Object>> {
        match self.store.get(name) {
            Some(value) => Some(Rc::clone(value)),
            None => self.outer.as_ref().and_then(|outer| outer.borrow().get(name)),
        }
    }

    /// Writes only to the current frame; never mutates outer frames.
    pub fn set(&mut self, name: impl Into<String>, value: Rc<Object>) {
        self.store.insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_outer_chain() {
        let outer = Environment::new();
        outer.borrow_mut().set("x", Rc::new(Object::Integer(1)));

        let inner = Environment::enclosed(Rc::clone(&outer));
        assert_eq!(inner.borrow().get("x"), Some(Rc::new(Object::Integer(1))));
    }

    #[test]
    fn set_does_not_mutate_outer() {
        let outer = Environment::new();
        outer.borrow_mut().set("x", Rc::new(Object::Integer(1)));

        let inner = Environment::enclosed(Rc::clone(&outer));
        inner.borrow_mut().set("x", Rc::new(Object::Integer(2)));

        assert_eq!(outer.borrow().get("x"), Some(Rc::new(Object::Integer(1))));
        assert_eq!(inner.borrow().get("x"), Some(Rc::new(Object::Integer(2))));
    }

    #[test]
    fn missing_name_returns_none() {
        let env = Environment::new();
        assert_eq!(env.borrow().get("missing"), None);
    }
}
