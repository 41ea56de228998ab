//! `atom` and `eq`.
//!
//! `eq`'s notion of equality is narrower than `Value::structural_eq`
//! (§4.A): atoms compare by name, numbers by value within their own
//! variant, closures and primitives by identity — but any two non-empty
//! lists are *never* `eq`, even if structurally identical.

use crate::env::Environment;
use crate::error::EvalError;
use crate::pool::Pool;
use crate::value::{Primitive, Value};
use std::rc::Rc;

pub fn builtin_atom(
    args: &[Value],
    _env: &Rc<Environment>,
    _pool: &mut Pool,
) -> Result<Value, EvalError> {
    EvalError::check_arity("atom", 1, Some(1), args.len())?;
    Ok(Value::bool_value(args[0].is_atomic()))
}

fn eq_values(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Nil, Value::Nil) => true,
        (Value::Atom(x), Value::Atom(y)) => x == y,
        (Value::Integer(x), Value::Integer(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x.to_bits() == y.to_bits(),
        (Value::Primitive(x), Value::Primitive(y)) => std::ptr::eq(*x, *y),
        (Value::Closure(x), Value::Closure(y)) => std::rc::Rc::ptr_eq(x, y),
        // Two non-empty pairs are never `eq`, regardless of contents.
        _ => false,
    }
}

pub fn builtin_eq(
    args: &[Value],
    _env: &Rc<Environment>,
    _pool: &mut Pool,
) -> Result<Value, EvalError> {
    EvalError::check_arity("eq", 2, Some(2), args.len())?;
    Ok(Value::bool_value(eq_values(&args[0], &args[1])))
}

static ATOM: Primitive = Primitive { name: "atom", special: false, min_arity: 1, max_arity: Some(1), func: builtin_atom };
static EQ: Primitive = Primitive { name: "eq", special: false, min_arity: 2, max_arity: Some(2), func: builtin_eq };

pub fn register(env: &Rc<Environment>) {
    env.define("atom", Value::Primitive(&ATOM));
    env.define("eq", Value::Primitive(&EQ));
}
