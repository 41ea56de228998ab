//! Closure construction, variable capture, and the closure apply rules
//! (partial application, full application, and macro re-evaluation).

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::eval;
use crate::pool::Pool;
use crate::value::{ClosureNode, Value};
use std::collections::HashSet;
use std::rc::Rc;

/// Builds a `Closure` from `(lambda params body)` (or, with `is_macro`,
/// `defmacro`'s `(params) body`).
///
/// 1. `params` must be a list of atoms, none of which is a reserved name.
/// 2. `params` and `body` are deep-copied into closure-owned storage.
/// 3. `body` is walked for free atoms, each of which is looked up in `env`
///    and, if bound, deep-copied into the closure's captured list.
pub fn make_closure(
    params: &Value,
    body: &Value,
    env: &Rc<Environment>,
    is_macro: bool,
) -> Result<Value, EvalError> {
    let param_items = params
        .to_vec()
        .map_err(|_| EvalError::ShapeError("lambda parameter list must be a proper list".into()))?;

    let mut param_names = Vec::with_capacity(param_items.len());
    for p in &param_items {
        match p {
            Value::Atom(name) if !Value::is_reserved_name(name) => {
                param_names.push(name.to_string())
            }
            Value::Atom(name) => {
                return Err(EvalError::ShapeError(format!(
                    "`{name}` is reserved and cannot be a parameter name"
                )))
            }
            other => {
                return Err(EvalError::TypeError {
                    operator: "lambda".to_string(),
                    expected: "atom".to_string(),
                    actual: format!("{other:?}"),
                })
            }
        }
    }

    let body = body.deep_copy();
    let captured = collect_captures(&body, &param_names, env);

    Ok(Value::Closure(Rc::new(ClosureNode {
        params: Value::from_vec(
            param_names.iter().map(|n| Value::atom(n)).collect(),
        ),
        body,
        captured,
        arity: param_names.len(),
        is_macro,
        defining_env: Rc::clone(env),
    })))
}

fn collect_captures(body: &Value, params: &[String], env: &Rc<Environment>) -> Value {
    let mut names_seen: HashSet<String> = params.iter().cloned().collect();
    let mut captured = Vec::new();
    walk_for_free_atoms(body, &mut names_seen, env, &mut captured);
    Value::from_vec(captured)
}

fn walk_for_free_atoms(
    expr: &Value,
    seen: &mut HashSet<String>,
    env: &Rc<Environment>,
    captured: &mut Vec<Value>,
) {
    match expr {
        Value::Atom(name) => {
            if Value::is_reserved_name(name) || seen.contains(name.as_ref()) {
                return;
            }
            seen.insert(name.to_string());
            if let Some(value) = env.get(name) {
                captured.push(Value::cons(Value::atom(name.as_ref()), value.deep_copy()));
            }
        }
        Value::Pair(p) => {
            walk_for_free_atoms(&p.head, seen, env, captured);
            walk_for_free_atoms(&p.tail, seen, env, captured);
        }
        _ => {}
    }
}

/// Applies a closure (already resolved, with `args` either evaluated — the
/// ordinary case — or unevaluated — when `closure.is_macro`). `caller_env`
/// is the environment the call site is evaluating in, used both for
/// evaluating partial-application arguments and for the macro
/// re-evaluation step.
pub fn apply_closure(
    closure: &Rc<ClosureNode>,
    args: Vec<Value>,
    caller_env: &Rc<Environment>,
    pool: &mut Pool,
) -> Result<Value, EvalError> {
    let n = args.len();
    let k = closure.arity;

    if n > k {
        return Err(EvalError::arity_error("closure", k, Some(k), n));
    }

    let param_names = closure.params.to_vec()?;

    if n < k {
        return partial_apply(closure, &param_names, args, caller_env, pool);
    }

    let call_env = Rc::new(Environment::with_parent(Rc::clone(&closure.defining_env)));
    for entry in closure.captured.to_vec()? {
        if let Value::Pair(p) = entry {
            if let Value::Atom(name) = &p.head {
                call_env.define(name, p.tail.deep_copy());
            }
        }
    }
    for (param, arg) in param_names.iter().zip(args.iter()) {
        if let Value::Atom(name) = param {
            call_env.define(name, arg.deep_copy());
        }
    }

    let result = pool.add_recursive(eval(&closure.body, &call_env, pool)?);

    if closure.is_macro {
        return Ok(pool.add_recursive(eval(&result, caller_env, pool)?));
    }
    Ok(result)
}

fn partial_apply(
    closure: &Rc<ClosureNode>,
    param_names: &[Value],
    args: Vec<Value>,
    _caller_env: &Rc<Environment>,
    _pool: &mut Pool,
) -> Result<Value, EvalError> {
    let n = args.len();

    let mut new_captured = closure.captured.to_vec()?;
    for (param, arg) in param_names.iter().zip(args.iter()) {
        if let Value::Atom(name) = param {
            // An argument may shadow a previously captured binding of the
            // same name; keep the most recent (the one we're adding now).
            new_captured.retain(|entry| {
                !matches!(entry, Value::Pair(p) if matches!(&p.head, Value::Atom(n) if n.as_ref() == name.as_ref()))
            });
            new_captured.push(Value::cons(
                Value::atom(name.as_ref()),
                arg.deep_copy(),
            ));
        }
    }

    let remaining_params = param_names[n..].to_vec();

    Ok(Value::Closure(Rc::new(ClosureNode {
        params: Value::from_vec(remaining_params).deep_copy(),
        body: closure.body.deep_copy(),
        captured: Value::from_vec(new_captured).deep_copy(),
        arity: closure.arity - n,
        is_macro: closure.is_macro,
        defining_env: Rc::clone(&closure.defining_env),
    })))
}
