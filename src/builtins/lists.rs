//! Pair operations: `car`, `cdr`, `cons`.

use crate::env::Environment;
use crate::error::EvalError;
use crate::pool::Pool;
use crate::value::{Primitive, Value};
use std::rc::Rc;

pub fn builtin_car(
    args: &[Value],
    _env: &Rc<Environment>,
    _pool: &mut Pool,
) -> Result<Value, EvalError> {
    EvalError::check_arity("car", 1, Some(1), args.len())?;
    match &args[0] {
        Value::Pair(p) => Ok(p.head.clone()),
        other => Err(EvalError::type_error("car", "pair", &format!("{other:?}"))),
    }
}

pub fn builtin_cdr(
    args: &[Value],
    _env: &Rc<Environment>,
    _pool: &mut Pool,
) -> Result<Value, EvalError> {
    EvalError::check_arity("cdr", 1, Some(1), args.len())?;
    match &args[0] {
        Value::Pair(p) => Ok(p.tail.clone()),
        other => Err(EvalError::type_error("cdr", "pair", &format!("{other:?}"))),
    }
}

pub fn builtin_cons(
    args: &[Value],
    _env: &Rc<Environment>,
    pool: &mut Pool,
) -> Result<Value, EvalError> {
    EvalError::check_arity("cons", 2, Some(2), args.len())?;
    if !args[1].is_list() {
        return Err(EvalError::type_error(
            "cons",
            "a list tail",
            &format!("{:?}", args[1]),
        ));
    }
    Ok(pool.add(Value::cons(args[0].clone(), args[1].clone())))
}

static CAR: Primitive = Primitive { name: "car", special: false, min_arity: 1, max_arity: Some(1), func: builtin_car };
static CDR: Primitive = Primitive { name: "cdr", special: false, min_arity: 1, max_arity: Some(1), func: builtin_cdr };
static CONS: Primitive = Primitive { name: "cons", special: false, min_arity: 2, max_arity: Some(2), func: builtin_cons };

pub fn register(env: &Rc<Environment>) {
    env.define("car", Value::Primitive(&CAR));
    env.define("cdr", Value::Primitive(&CDR));
    env.define("cons", Value::Primitive(&CONS));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_and_pool() -> (Rc<Environment>, Pool) {
        (Rc::new(Environment::new()), Pool::new())
    }

    #[test]
    fn car_and_cdr_of_pair() {
        let (env, mut pool) = env_and_pool();
        let pair = Value::cons(Value::Integer(1), Value::Integer(2));
        assert!(matches!(builtin_car(&[pair.clone()], &env, &mut pool).unwrap(), Value::Integer(1)));
        assert!(matches!(builtin_cdr(&[pair], &env, &mut pool).unwrap(), Value::Integer(2)));
    }

    #[test]
    fn car_on_non_pair_is_type_error() {
        let (env, mut pool) = env_and_pool();
        assert!(builtin_car(&[Value::Integer(1)], &env, &mut pool).is_err());
    }

    #[test]
    fn cons_requires_list_tail() {
        let (env, mut pool) = env_and_pool();
        let ok = builtin_cons(&[Value::Integer(1), Value::Nil], &env, &mut pool);
        assert!(ok.is_ok());

        let bad = builtin_cons(&[Value::Integer(1), Value::Integer(2)], &env, &mut pool);
        assert!(matches!(bad, Err(EvalError::TypeError { .. })));
    }
}
