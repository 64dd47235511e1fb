use crate::object::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Default)]
struct Scope {
    bindings: HashMap<String, Value>,
    parent: Option<Namespace>,
}

/// A shared, mutable scope with an optional parent. Cloning a `Namespace`
/// clones the handle, not the bindings.
///
/// A function stored in the scope it captured forms an `Rc` cycle, so such
/// scopes live until the process exits.
#[derive(Clone, Default)]
pub struct Namespace(Rc<RefCell<Scope>>);

impl Namespace {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn enclosed(parent: &Namespace) -> Self {
        Self(Rc::new(RefCell::new(Scope {
            bindings: HashMap::new(),
            parent: Some(parent.clone()),
        })))
    }

    /// Looks the name up here, then in each parent in turn.
    pub fn get(&self, name: &str) -> Option<Value> {
        let scope = self.0.borrow();
        match scope.bindings.get(name) {
            Some(value) => Some(value.clone()),
            None => scope.parent.as_ref().and_then(|parent| parent.get(name)),
        }
    }

    /// Always binds in this scope, shadowing any parent binding.
    pub fn set(&self, name: &str, value: Value) {
        self.0.borrow_mut().bindings.insert(name.to_owned(), value);
    }

    pub fn ptr_eq(&self, other: &Namespace) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let scope = self.0.borrow();
        let mut names: Vec<&String> = scope.bindings.keys().collect();
        names.sort();

        f.debug_struct("Namespace")
            .field("bindings", &names)
            .field("has_parent", &scope.parent.is_some())
            .finish()
    }
}
