//! The tagged value representation shared by every other module.
//!
//! A [`Value`] is cheap to clone: `Atom`, `Pair`, and `Closure` are
//! reference-counted, so cloning a `Value` never copies the subtree it
//! points to. `deep_copy` is the only operation that actually duplicates a
//! subtree, and it is what closure construction and environment mutation use
//! to keep the short-lived pool's reachability analysis (see [`crate::pool`])
//! disjoint from long-lived storage.

use crate::error::EvalError;
use std::rc::Rc;

/// A built-in operator: either *evaluating* (arguments are evaluated before
/// the function runs) or *special* (the function inspects the unevaluated
/// argument list itself, e.g. `quote`, `cond`, `lambda`).
pub type PrimitiveFn =
    fn(&[Value], &Rc<crate::env::Environment>, &mut crate::pool::Pool) -> Result<Value, EvalError>;

pub struct Primitive {
    pub name: &'static str,
    pub special: bool,
    pub min_arity: usize,
    pub max_arity: Option<usize>,
    pub func: PrimitiveFn,
}

impl std::fmt::Debug for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Primitive({})", self.name)
    }
}

/// Two owned children, `head` and `tail`. A proper list is a chain of pairs
/// whose final tail is `Value::Nil`.
#[derive(Debug)]
pub struct PairNode {
    pub head: Value,
    pub tail: Value,
}

/// A callable value: parameters, body, and the bindings it captured at
/// construction time. `is_macro` distinguishes the `defmacro` subkind (see
/// [`crate::closure`]). `defining_env` is the environment that was active at
/// construction time, consulted as a fallback by the closure's call
/// environment for names absent from `captured` — notably a name the
/// closure's own `set` binds only after the lambda was constructed, as in
/// `(set 'f (lambda (x) (f ...)))`'s self-reference.
#[derive(Debug)]
pub struct ClosureNode {
    pub params: Value,
    pub body: Value,
    pub captured: Value,
    pub arity: usize,
    pub is_macro: bool,
    pub defining_env: Rc<crate::env::Environment>,
}

#[derive(Clone, Debug)]
pub enum Value {
    /// The canonical empty list; also the false value.
    Nil,
    Atom(Rc<str>),
    Integer(i32),
    Float(f32),
    Pair(Rc<PairNode>),
    Primitive(&'static Primitive),
    Closure(Rc<ClosureNode>),
}

/// Stable identity for pointer-based reachability (`crate::pool`). Only
/// heap-allocated, pool-tracked variants have one; everything else is cheap
/// enough that the pool doesn't need to track its lifetime.
pub type Identity = usize;

impl Value {
    pub fn atom(name: impl AsRef<str>) -> Value {
        Value::Atom(Rc::from(name.as_ref()))
    }

    pub fn truth() -> Value {
        Value::atom("t")
    }

    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil)
    }

    pub fn bool_value(b: bool) -> Value {
        if b {
            Value::truth()
        } else {
            Value::Nil
        }
    }

    pub fn cons(head: Value, tail: Value) -> Value {
        Value::Pair(Rc::new(PairNode { head, tail }))
    }

    pub fn is_reserved_name(name: &str) -> bool {
        name == "t" || name == "()"
    }

    /// `atom` primitive's notion: true for `Atom`, `Integer`, `Float`, and
    /// the empty list, false for non-empty pairs, closures, and primitives.
    pub fn is_atomic(&self) -> bool {
        matches!(
            self,
            Value::Nil | Value::Atom(_) | Value::Integer(_) | Value::Float(_)
        )
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Value::Pair(_))
    }

    pub fn is_empty_list(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// A proper list is `Nil` or a `Pair` whose tail is itself a proper list.
    pub fn is_list(&self) -> bool {
        match self {
            Value::Nil => true,
            Value::Pair(p) => p.tail.is_list(),
            _ => false,
        }
    }

    pub fn identity(&self) -> Option<Identity> {
        match self {
            Value::Pair(p) => Some(Rc::as_ptr(p) as Identity),
            Value::Closure(c) => Some(Rc::as_ptr(c) as Identity),
            _ => None,
        }
    }

    /// Converts a proper list into a `Vec`, shallow-cloning each element.
    /// Fails with `ShapeError` on an improper list.
    pub fn to_vec(&self) -> Result<Vec<Value>, EvalError> {
        let mut out = Vec::new();
        let mut cur = self.clone();
        loop {
            match cur {
                Value::Nil => return Ok(out),
                Value::Pair(p) => {
                    out.push(p.head.clone());
                    cur = p.tail.clone();
                }
                _ => return Err(EvalError::ShapeError("expected a proper list".to_string())),
            }
        }
    }

    pub fn from_vec(items: Vec<Value>) -> Value {
        let mut list = Value::Nil;
        for item in items.into_iter().rev() {
            list = Value::cons(item, list);
        }
        list
    }

    /// Duplicates an entire subtree, giving every `Pair`/`Closure` node a
    /// fresh identity. This is what keeps closure capture and environment
    /// storage independent of the short-lived pool's temporaries.
    pub fn deep_copy(&self) -> Value {
        match self {
            Value::Nil | Value::Integer(_) | Value::Float(_) | Value::Primitive(_) => {
                self.clone()
            }
            Value::Atom(name) => Value::Atom(Rc::clone(name)),
            Value::Pair(p) => Value::cons(p.head.deep_copy(), p.tail.deep_copy()),
            Value::Closure(c) => Value::Closure(Rc::new(ClosureNode {
                params: c.params.deep_copy(),
                body: c.body.deep_copy(),
                captured: c.captured.deep_copy(),
                arity: c.arity,
                is_macro: c.is_macro,
                // The defining environment is shared, live state, not a
                // value subtree — clone the handle, not its contents.
                defining_env: Rc::clone(&c.defining_env),
            })),
        }
    }

    /// Structural (deep) equality: same variant and, for `Pair`, head and
    /// tail recursively equal. Numbers compare by exact value within their
    /// own variant — `Integer(3)` and `Float(3.0)` are not structurally
    /// equal. This is deliberately *not* the same relation as the `eq`
    /// primitive, which additionally refuses to call any two non-empty
    /// lists equal (see `crate::builtins::predicates`).
    pub fn structural_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Atom(a), Value::Atom(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Pair(a), Value::Pair(b)) => {
                a.head.structural_eq(&b.head) && a.tail.structural_eq(&b.tail)
            }
            (Value::Primitive(a), Value::Primitive(b)) => std::ptr::eq(*a, *b),
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
