//! Numeric comparison: `=`.
//!
//! Unlike `eq` (`crate::builtins::predicates`), `=` widens Integer/Float
//! before comparing, so `(= 3 3.0)` is `t` even though `(eq 3 3.0)` is `()`.

use crate::env::Environment;
use crate::error::EvalError;
use crate::pool::Pool;
use crate::value::{Primitive, Value};
use std::rc::Rc;

fn as_f32(op: &str, v: &Value) -> Result<f32, EvalError> {
    match v {
        Value::Integer(n) => Ok(*n as f32),
        Value::Float(f) => Ok(*f),
        other => Err(EvalError::type_error(op, "integer or float", &format!("{other:?}"))),
    }
}

pub fn builtin_numeq(
    args: &[Value],
    _env: &Rc<Environment>,
    _pool: &mut Pool,
) -> Result<Value, EvalError> {
    EvalError::check_arity("=", 2, Some(2), args.len())?;
    let a = as_f32("=", &args[0])?;
    let b = as_f32("=", &args[1])?;
    Ok(Value::bool_value(a == b))
}

static NUMEQ: Primitive = Primitive {
    name: "=",
    special: false,
    min_arity: 2,
    max_arity: Some(2),
    func: builtin_numeq,
};

pub fn register(env: &Rc<Environment>) {
    env.define("=", Value::Primitive(&NUMEQ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_and_pool() -> (Rc<Environment>, Pool) {
        (Rc::new(Environment::new()), Pool::new())
    }

    #[test]
    fn equal_numbers_widen_across_variants() {
        let (env, mut pool) = env_and_pool();
        let result = builtin_numeq(&[Value::Integer(3), Value::Float(3.0)], &env, &mut pool).unwrap();
        assert!(result.is_truthy());
    }

    #[test]
    fn unequal_numbers() {
        let (env, mut pool) = env_and_pool();
        let result = builtin_numeq(&[Value::Integer(3), Value::Integer(4)], &env, &mut pool).unwrap();
        assert!(!result.is_truthy());
    }

    #[test]
    fn non_numeric_operand_is_type_error() {
        let (env, mut pool) = env_and_pool();
        let result = builtin_numeq(&[Value::atom("x"), Value::Integer(1)], &env, &mut pool);
        assert!(result.is_err());
    }
}
