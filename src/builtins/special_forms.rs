//! Special forms: `quote`, `cond`, `set`, `env`, `lambda`, `defmacro`.
//!
//! Unlike the evaluating primitives (`crate::builtins::arithmetic`,
//! `comparison`, `lists`, `predicates`), these inspect their argument list
//! *unevaluated* and decide for themselves what, if anything, to evaluate.

use crate::closure::make_closure;
use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::eval;
use crate::pool::Pool;
use crate::value::{Primitive, Value};
use std::rc::Rc;

pub fn builtin_quote(
    args: &[Value],
    _env: &Rc<Environment>,
    _pool: &mut Pool,
) -> Result<Value, EvalError> {
    EvalError::check_arity("quote", 1, Some(1), args.len())?;
    Ok(args[0].clone())
}

/// Each argument is a `(predicate consequent)` pair; predicates are
/// evaluated left to right and the first truthy one's consequent is
/// evaluated and returned. No truthy predicate yields `()`.
pub fn builtin_cond(
    args: &[Value],
    env: &Rc<Environment>,
    pool: &mut Pool,
) -> Result<Value, EvalError> {
    for clause in args {
        let parts = clause
            .to_vec()
            .map_err(|_| EvalError::arity_error("cond", 2, Some(2), 0))?;
        if parts.len() != 2 {
            return Err(EvalError::arity_error("cond", 2, Some(2), parts.len()));
        }
        let predicate = eval(&parts[0], env, pool)?;
        if predicate.is_truthy() {
            return eval(&parts[1], env, pool);
        }
    }
    Ok(Value::Nil)
}

/// The first argument must evaluate to a non-reserved atom naming the
/// binding; the second is evaluated and a deep copy of it is stored.
pub fn builtin_set(
    args: &[Value],
    env: &Rc<Environment>,
    pool: &mut Pool,
) -> Result<Value, EvalError> {
    EvalError::check_arity("set", 2, Some(2), args.len())?;
    let target = eval(&args[0], env, pool)?;
    let name = match &target {
        Value::Atom(name) if !Value::is_reserved_name(name) => name.clone(),
        Value::Atom(name) => {
            return Err(EvalError::type_error("set", "non-reserved atom", name))
        }
        other => {
            return Err(EvalError::type_error(
                "set",
                "atom",
                &format!("{other:?}"),
            ))
        }
    };
    let value = eval(&args[1], env, pool)?;
    env.define(&name, value.clone());
    Ok(value)
}

pub fn builtin_env(
    args: &[Value],
    env: &Rc<Environment>,
    _pool: &mut Pool,
) -> Result<Value, EvalError> {
    EvalError::check_arity("env", 0, Some(0), args.len())?;
    Ok(env.as_value())
}

pub fn builtin_lambda(
    args: &[Value],
    env: &Rc<Environment>,
    pool: &mut Pool,
) -> Result<Value, EvalError> {
    EvalError::check_arity("lambda", 2, Some(2), args.len())?;
    let closure = make_closure(&args[0], &args[1], env, false)?;
    Ok(pool.add_recursive(closure))
}

/// `(defmacro name (params) body)` — builds a macro-tagged closure and
/// binds it under `name`, which is a bare (unevaluated) symbol.
pub fn builtin_defmacro(
    args: &[Value],
    env: &Rc<Environment>,
    pool: &mut Pool,
) -> Result<Value, EvalError> {
    EvalError::check_arity("defmacro", 3, Some(3), args.len())?;
    let name = match &args[0] {
        Value::Atom(name) if !Value::is_reserved_name(name) => name.clone(),
        other => {
            return Err(EvalError::type_error(
                "defmacro",
                "non-reserved atom",
                &format!("{other:?}"),
            ))
        }
    };
    let closure = make_closure(&args[1], &args[2], env, true)?;
    env.define(&name, closure.clone());
    Ok(pool.add_recursive(closure))
}

static QUOTE: Primitive = Primitive { name: "quote", special: true, min_arity: 1, max_arity: Some(1), func: builtin_quote };
static COND: Primitive = Primitive { name: "cond", special: true, min_arity: 0, max_arity: None, func: builtin_cond };
static SET: Primitive = Primitive { name: "set", special: true, min_arity: 2, max_arity: Some(2), func: builtin_set };
static ENV: Primitive = Primitive { name: "env", special: true, min_arity: 0, max_arity: Some(0), func: builtin_env };
static LAMBDA: Primitive = Primitive { name: "lambda", special: true, min_arity: 2, max_arity: Some(2), func: builtin_lambda };
static DEFMACRO: Primitive = Primitive { name: "defmacro", special: true, min_arity: 3, max_arity: Some(3), func: builtin_defmacro };

pub fn register(env: &Rc<Environment>) {
    env.define("quote", Value::Primitive(&QUOTE));
    env.define("cond", Value::Primitive(&COND));
    env.define("set", Value::Primitive(&SET));
    env.define("env", Value::Primitive(&ENV));
    env.define("lambda", Value::Primitive(&LAMBDA));
    env.define("defmacro", Value::Primitive(&DEFMACRO));
}
