//! The environment: an association list of `(name, value)` pairs.
//!
//! Unlike a parent-chain scope model, the environment's own bindings *are*
//! a `Value` — a chain of `(name . value)` `Pair`s, newest binding first —
//! which is exactly what the `env` special form (§4.F) hands back to the
//! program. `define` never mutates an existing pair node; it prepends a new
//! one onto the spine. That's what gives capture-by-value (`crate::closure`)
//! its immutability guarantee: a closure that copied the spine before a
//! later `set` still sees the old bindings, because the old nodes were
//! never touched.
//!
//! An environment may additionally hold a `parent`, consulted by `get` only
//! after the local spine comes up empty. A closure's call environment uses
//! this to fall back to the environment it was defined in, which is how a
//! name free in the body but not yet bound at closure-construction time
//! (the canonical self-recursive `(set 'f (lambda (x) ... (f ...) ...))`
//! idiom) still resolves once the enclosing `set` finishes — see
//! `crate::closure::apply_closure`.

use crate::value::Value;
use std::cell::RefCell;
use std::rc::Rc;

pub struct Environment {
    bindings: RefCell<Value>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    pub fn new() -> Environment {
        Environment {
            bindings: RefCell::new(Value::Nil),
            parent: None,
        }
    }

    /// A fresh, empty environment that falls back to `parent` for any name
    /// not bound locally.
    pub fn with_parent(parent: Rc<Environment>) -> Environment {
        Environment {
            bindings: RefCell::new(Value::Nil),
            parent: Some(parent),
        }
    }

    /// First-match-wins lookup by name in the local spine, falling back to
    /// `parent` (if any) when the name isn't bound locally.
    pub fn get(&self, name: &str) -> Option<Value> {
        Self::lookup(&self.bindings.borrow(), name)
            .or_else(|| self.parent.as_ref().and_then(|p| p.get(name)))
    }

    fn lookup(alist: &Value, name: &str) -> Option<Value> {
        let mut cur = alist.clone();
        loop {
            match cur {
                Value::Pair(p) => {
                    if let Value::Pair(entry) = &p.head {
                        if let Value::Atom(entry_name) = &entry.head {
                            if entry_name.as_ref() == name {
                                return Some(entry.tail.clone());
                            }
                        }
                    }
                    cur = p.tail.clone();
                }
                _ => return None,
            }
        }
    }

    /// Deep-copies both `name` and `value`, then prepends `(name . value)`
    /// onto the environment's spine. Previously captured snapshots of the
    /// environment (e.g. inside a closure) are unaffected.
    pub fn define(&self, name: &str, value: Value) {
        let entry = Value::cons(Value::atom(name).deep_copy(), value.deep_copy());
        let rest = self.bindings.borrow().clone();
        *self.bindings.borrow_mut() = Value::cons(entry, rest);
    }

    /// The environment's current spine as an ordinary `Value` — what `env`
    /// (§4.F) returns.
    pub fn as_value(&self) -> Value {
        self.bindings.borrow().clone()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_after_define() {
        let env = Environment::new();
        env.define("x", Value::Integer(42));
        let found = env.get("x").unwrap();
        assert!(found.structural_eq(&Value::Integer(42)));
    }

    #[test]
    fn newest_binding_shadows_older_one() {
        let env = Environment::new();
        env.define("x", Value::Integer(1));
        env.define("x", Value::Integer(2));
        assert!(env.get("x").unwrap().structural_eq(&Value::Integer(2)));
    }

    #[test]
    fn undefined_name_is_none() {
        let env = Environment::new();
        assert!(env.get("nope").is_none());
    }

    #[test]
    fn local_binding_shadows_parent() {
        let parent = Rc::new(Environment::new());
        parent.define("x", Value::Integer(1));
        let child = Environment::with_parent(Rc::clone(&parent));
        child.define("x", Value::Integer(2));
        assert!(child.get("x").unwrap().structural_eq(&Value::Integer(2)));
    }

    #[test]
    fn falls_back_to_parent_when_not_bound_locally() {
        let parent = Rc::new(Environment::new());
        let child = Environment::with_parent(Rc::clone(&parent));
        assert!(child.get("x").is_none());
        parent.define("x", Value::Integer(42));
        // The parent is the same live object, so a binding added after the
        // child was created is still visible through it.
        assert!(child.get("x").unwrap().structural_eq(&Value::Integer(42)));
    }

    #[test]
    fn as_value_is_an_alist_of_name_value_pairs() {
        let env = Environment::new();
        env.define("x", Value::Integer(1));
        let snapshot = env.as_value();
        let entries = snapshot.to_vec().unwrap();
        assert_eq!(entries.len(), 1);
        let entry = entries[0].clone();
        if let Value::Pair(p) = entry {
            assert!(p.head.structural_eq(&Value::atom("x")));
            assert!(p.tail.structural_eq(&Value::Integer(1)));
        } else {
            panic!("expected a pair");
        }
    }

    #[test]
    fn earlier_snapshot_is_unaffected_by_later_define() {
        let env = Environment::new();
        env.define("y", Value::atom("a"));
        let snapshot_before = env.as_value();
        env.define("y", Value::atom("b"));
        // The old snapshot's spine still resolves `y` to its old value.
        let found = Environment::lookup(&snapshot_before, "y").unwrap();
        assert!(found.structural_eq(&Value::atom("a")));
    }
}
